use std::process::ExitCode;
use std::sync::Arc;
use std::{env, fs, io};

use rustc_hash::FxHashSet;
use zworkspace::kernel::services::adapters::{
    ensure_settings_file, ensure_storage_dir, load_settings, FileStorage,
};
use zworkspace::kernel::services::ports::SystemClock;
use zworkspace::kernel::{SortMode, WorkspaceError, WorkspaceStore};
use zworkspace::models::{FileId, FolderPath, PathError, TreeRowKind};

mod logging;

const USAGE: &str = "usage: zworkspace <command> [args]

commands:
  ls [manual|name|recent]   list files (pinned first)
  tree                      print the folder tree
  touch <path>              create a file
  mkdir <path>              create a folder
  mv <path> <folder|/>      move a file or folder
  rm <path>                 move a file or folder to the trash
  trash                     list trash entries
  restore <id>              restore a trash entry
  export <file>             write the workspace as JSON
  import <file>             replace the workspace from JSON";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}", USAGE)]
    Usage,
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let logging = logging::init();

    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "cannot create settings file");
    }
    let settings = load_settings().unwrap_or_default();

    let dir = match ensure_storage_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("zworkspace: {e}");
            return ExitCode::FAILURE;
        }
    };
    let storage = Arc::new(FileStorage::new(dir));
    let mut store = WorkspaceStore::open(settings, Arc::new(SystemClock), storage);

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&mut store, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage) => {
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::warn!(error = %e, "command failed");
            eprintln!("zworkspace: {e}");
            if let Some(guard) = &logging {
                eprintln!("logs: {}", guard.log_dir().display());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(store: &mut WorkspaceStore, args: &[String]) -> Result<(), CliError> {
    let Some((command, rest)) = args.split_first() else {
        return Err(CliError::Usage);
    };

    match (command.as_str(), rest) {
        ("ls", []) => list(store, store.settings().sort_mode),
        ("ls", [mode]) => list(store, SortMode::from_name(mode).ok_or(CliError::Usage)?),
        ("tree", []) => print_tree(store),
        ("touch", [path]) => {
            let id = store.create_file(&FolderPath::Root, path, None)?;
            if let Some(file) = store.file(&id) {
                println!("{}", file.path);
            }
        }
        ("mkdir", [path]) => {
            let folder = FolderPath::parse(path)?;
            let created = store.create_folder(&folder.parent(), folder.name())?;
            println!("{created}/");
        }
        ("mv", [from, to]) => {
            let target = match to.as_str() {
                "/" => FolderPath::Root,
                other => FolderPath::parse(other)?,
            };
            let outcome = match store.file_by_path(from).map(|f| f.id.clone()) {
                Some(id) => store.move_entries_to_folder(&[id], &[], &target)?,
                None => store.move_entries_to_folder(&[], std::slice::from_ref(from), &target)?,
            };
            println!(
                "moved {} file(s), {} folder(s), skipped {} locked",
                outcome.moved_files, outcome.moved_folders, outcome.skipped_locked
            );
        }
        ("rm", [path]) => match store.file_by_path(path).map(|f| f.id.clone()) {
            Some(id) => store.delete_file(&id)?,
            None => {
                let outcome = store.delete_folder(path)?;
                println!("trashed {} file(s)", outcome.trashed);
            }
        },
        ("trash", []) => {
            for entry in store.trash_entries() {
                println!("{}\t{}\t{}", entry.id(), entry.file.path, entry.deleted_at);
            }
        }
        ("restore", [id]) => {
            let restored = store.restore_from_trash(&FileId::new(id.as_str()))?;
            if let Some(file) = store.file(&restored) {
                println!("{}", file.path);
            }
        }
        ("export", [file]) => {
            fs::write(file, store.export_workspace()?)?;
            println!("{file}");
        }
        ("import", [file]) => {
            let text = fs::read_to_string(file)?;
            let summary = store.import_workspace(&text, true)?;
            println!(
                "imported {} file(s), {} folder(s), {} trash item(s)",
                summary.files, summary.folders, summary.trash
            );
        }
        _ => return Err(CliError::Usage),
    }
    Ok(())
}

fn list(store: &WorkspaceStore, mode: SortMode) {
    for file in store.sorted_files(mode) {
        let mut flags = String::new();
        if file.pinned {
            flags.push('p');
        }
        if file.locked {
            flags.push('l');
        }
        if file.is_dirty() {
            flags.push('*');
        }
        println!("{:<3} {}", flags, file.path);
    }
}

fn print_tree(store: &WorkspaceStore) {
    for row in store.tree().rows(&FxHashSet::default()) {
        let indent = "  ".repeat(row.depth as usize);
        match row.kind {
            TreeRowKind::Folder { file_count, .. } => {
                println!("{indent}{}/ ({file_count})", row.name)
            }
            TreeRowKind::File { .. } => println!("{indent}{}", row.name),
        }
    }
}
