use clap::Parser;
use directories::ProjectDirs;
use staffingly_notes::api::{ConfigAction, NotesApi, NotesPaths};
use staffingly_notes::config::NotesConfig;
use staffingly_notes::editor::edit_form;
use staffingly_notes::error::{NotesError, Result};
use staffingly_notes::export::{DirExporter, ExportFile, FileExporter};
use staffingly_notes::form::FormField;
use staffingly_notes::model::NoteId;
use staffingly_notes::store::fs::FileStore;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands, FormArgs};
use print::{print_config, print_full_note, print_messages, print_notes};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: NotesApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { form, no_editor }) => handle_add(&mut ctx, form, no_editor),
        Some(Commands::Edit {
            id,
            form,
            no_editor,
        }) => handle_edit(&mut ctx, id, form, no_editor),
        Some(Commands::Show { id }) => handle_show(&ctx, id),
        Some(Commands::List { search }) => handle_list(&ctx, search.as_deref().unwrap_or("")),
        Some(Commands::Search { query }) => handle_list(&ctx, &query),
        Some(Commands::Delete { id, yes }) => handle_delete(&mut ctx, id, yes),
        Some(Commands::ClearAll { yes }) => handle_clear_all(&mut ctx, yes),
        Some(Commands::Export {
            search,
            out,
            stdout,
        }) => handle_export(&mut ctx, search.as_deref().unwrap_or(""), out, stdout),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, ""),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "staffingly", "notes")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| NotesError::Store("Could not determine data directory".into()))?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");

    let config = NotesConfig::load(&data_dir)?;
    let store = FileStore::new(data_dir.clone());
    let paths = NotesPaths { data: data_dir };

    Ok(AppContext {
        api: NotesApi::new(store, paths, config),
    })
}

fn apply_form_args(ctx: &mut AppContext, args: FormArgs) {
    let fields = [
        (FormField::Datetime, args.datetime),
        (FormField::Name, args.name),
        (FormField::Phone, args.phone),
        (FormField::Email, args.email),
        (FormField::Notes, args.notes),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            ctx.api.set_field(field, value);
        }
    }
}

/// Fill the form in $EDITOR. Returns false when the user left it empty.
fn fill_in_editor(ctx: &mut AppContext) -> Result<bool> {
    let edited = edit_form(ctx.api.form(), &ctx.api.now_string())?;
    let has_content = [
        FormField::Name,
        FormField::Phone,
        FormField::Email,
        FormField::Notes,
    ]
    .iter()
    .any(|f| !edited.get(*f).trim().is_empty());
    ctx.api.replace_form(edited);
    Ok(has_content)
}

fn handle_add(ctx: &mut AppContext, form: FormArgs, no_editor: bool) -> Result<()> {
    ctx.api.clear_form();
    let use_editor = form.is_empty() && !no_editor;
    apply_form_args(ctx, form);

    if use_editor && !fill_in_editor(ctx)? {
        println!("Empty form, nothing saved.");
        return Ok(());
    }

    let result = ctx.api.submit()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, id: NoteId, form: FormArgs, no_editor: bool) -> Result<()> {
    let loaded = ctx.api.edit_note(id)?;
    if loaded.affected_notes.is_empty() {
        print_messages(&loaded.messages);
        return Ok(());
    }

    let use_editor = form.is_empty() && !no_editor;
    apply_form_args(ctx, form);

    if use_editor && !fill_in_editor(ctx)? {
        println!("Empty form, note left unchanged.");
        return Ok(());
    }

    let result = ctx.api.submit()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: NoteId) -> Result<()> {
    let result = ctx.api.view_note(id)?;
    for note in &result.listed_notes {
        print_full_note(note);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, query: &str) -> Result<()> {
    let result = ctx.api.list_notes(query)?;
    print_notes(&result.listed_notes, result.total_notes);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: NoteId, yes: bool) -> Result<()> {
    let result = ctx.api.delete_note(id, yes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear_all(ctx: &mut AppContext, yes: bool) -> Result<()> {
    let result = ctx.api.clear_all(yes)?;
    print_messages(&result.messages);
    Ok(())
}

/// Writes the CSV to stdout instead of a file.
struct StdoutExporter;

impl FileExporter for StdoutExporter {
    fn export(&mut self, file: &ExportFile) -> Result<PathBuf> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&file.bytes).map_err(NotesError::Io)?;
        writeln!(stdout).map_err(NotesError::Io)?;
        Ok(PathBuf::from("-"))
    }
}

fn handle_export(
    ctx: &mut AppContext,
    query: &str,
    out: Option<PathBuf>,
    stdout: bool,
) -> Result<()> {
    if stdout {
        let result = ctx.api.export_notes_to(&mut StdoutExporter, query)?;
        // The CSV itself is the output; only problems are reported.
        if result.has_problems() {
            print_messages(&result.messages);
        }
        return Ok(());
    }

    let result = match out {
        Some(dir) => ctx.api.export_notes_to(&mut DirExporter::new(dir), query)?,
        None => ctx.api.export_notes(query)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        print_config(&result.config_entries);
    }
    print_messages(&result.messages);
    Ok(())
}
