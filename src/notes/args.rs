use clap::{Args, Parser, Subcommand};
use staffingly_notes::model::NoteId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "snotes")]
#[command(version, about = "Local contact and notes pad with CSV export", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the notes snapshot and config
    #[arg(long, global = true, env = "SNOTES_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Form fields. Unset flags leave the field as it is.
#[derive(Args, Debug, Default, Clone)]
pub struct FormArgs {
    /// Date and time (defaults to now when left blank)
    #[arg(long)]
    pub datetime: Option<String>,

    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Phone or mobile
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl FormArgs {
    pub fn is_empty(&self) -> bool {
        self.datetime.is_none()
            && self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.notes.is_none()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a new note
    #[command(alias = "n")]
    Add {
        #[command(flatten)]
        form: FormArgs,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// Edit an existing note
    #[command(alias = "e")]
    Edit {
        /// Id of the note
        id: NoteId,

        #[command(flatten)]
        form: FormArgs,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// Show a note in full
    #[command(alias = "v")]
    Show {
        /// Id of the note
        id: NoteId,
    },

    /// List notes
    #[command(alias = "ls")]
    List {
        /// Only show notes containing this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search notes (dedicated command)
    Search { query: String },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Id of the note
        id: NoteId,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete ALL notes
    ClearAll {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Export notes as CSV
    Export {
        /// Only export notes containing this text
        #[arg(short, long)]
        search: Option<String>,

        /// Directory to write the file to (overrides config)
        #[arg(short, long, conflicts_with = "stdout")]
        out: Option<PathBuf>,

        /// Print the CSV instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (export-dir, datetime-format, confirm)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_fields() {
        let cli = Cli::try_parse_from([
            "snotes", "add", "--name", "Alex", "--notes", "hi", "--no-editor",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add { form, no_editor }) => {
                assert_eq!(form.name.as_deref(), Some("Alex"));
                assert_eq!(form.notes.as_deref(), Some("hi"));
                assert!(form.phone.is_none());
                assert!(no_editor);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_aliases_and_counts_verbosity() {
        let cli = Cli::try_parse_from(["snotes", "-vv", "rm", "42", "-y"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Some(Commands::Delete { id: 42, yes: true })
        ));
    }

    #[test]
    fn export_out_conflicts_with_stdout() {
        assert!(Cli::try_parse_from(["snotes", "export", "--out", "x", "--stdout"]).is_err());
    }

    #[test]
    fn bare_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["snotes"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn form_args_emptiness() {
        assert!(FormArgs::default().is_empty());
        let args = FormArgs {
            email: Some("a@x.com".into()),
            ..FormArgs::default()
        };
        assert!(!args.is_empty());
    }
}
