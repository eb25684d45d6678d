//! Shell scripts: clap's static completions for this binary, and hooks that
//! route another command's completions through `complete`.

use clap::{Command, ValueEnum};
use clap_complete::{generate, shells};
use std::io::{self, Write};

use super::NOT_HANDLED_STATUS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

/// Write the static completion script for `cmd` to `out`.
pub fn generate_completions(cmd: &mut Command, shell: Shell, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();

    match shell {
        Shell::Bash => generate(shells::Bash, cmd, bin_name, out),
        Shell::Zsh => generate(shells::Zsh, cmd, bin_name, out),
        Shell::Fish => generate(shells::Fish, cmd, bin_name, out),
    }
}

/// Write a hook registering `bin complete` as the completer for `target`.
///
/// Suggestions are offered when the helper handles the line. On the
/// not-handled status the hook falls back to file completion; any other
/// failure offers nothing.
pub fn write_hook(shell: Shell, bin: &str, target: &str, out: &mut dyn Write) -> io::Result<()> {
    let func = format!("__platform_complete_{}", function_suffix(target));
    let status = NOT_HANDLED_STATUS;

    match shell {
        Shell::Bash => write!(
            out,
            r#"{func}() {{
    local out
    out=$({bin} complete "${{COMP_LINE:0:$COMP_POINT}}" 2>/dev/null)
    case $? in
        0) ;;
        {status}) COMPREPLY=($(compgen -f -- "${{COMP_WORDS[COMP_CWORD]}}")); return ;;
        *) return ;;
    esac
    local IFS=$'\n'
    COMPREPLY=($(printf '%s\n' "$out" | cut -f1))
}}
complete -F {func} {target}
"#
        ),
        Shell::Zsh => write!(
            out,
            r#"{func}() {{
    local out
    out=$({bin} complete "${{(j: :)words[1,CURRENT]}}" 2>/dev/null)
    case $? in
        0) ;;
        {status}) _files; return ;;
        *) return 1 ;;
    esac
    compadd -- ${{(f)"$(print -r -- "$out" | cut -f1)"}}
}}
compdef {func} {target}
"#
        ),
        Shell::Fish => write!(
            out,
            r#"function {func}
    set -l out ({bin} complete (commandline -cp) 2>/dev/null)
    switch $status
        case 0
            printf '%s\n' $out
        case {status}
            __fish_complete_path (commandline -ct)
    end
end
complete -c {target} -f -a '({func})'
"#
        ),
    }
}

/// Shell function names only take word characters.
fn function_suffix(target: &str) -> String {
    target
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
