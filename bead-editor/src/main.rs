// Headless driver for the bead editor.
//
// Reads one command per line from a script file or stdin and prints the board
// after every change:
//
//   tool fill | color 2 | down 3 4 | move 3 5 | up | undo | redo | clear
//   save <name> | open <name> | delete <name> | list | export | import <path>
//   print | quit

use anyhow::{bail, Context};
use bead_core::{BeadColor, CellPos};
use bead_editor::editor::{AlwaysConfirm, Confirm, ToolKind};
use bead_editor::render::{board_to_string, TextRenderer};
use bead_editor::{Editor, EditorConfig, PointerEvent};
use bead_project::{Catalog, JsonFileCatalog};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bead-editor", about = "Edit 24x24 fuse-bead patterns from the command line")]
struct Args {
    /// Command script to run. Reads stdin when omitted.
    script: Option<PathBuf>,

    /// JSON config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog file, overriding the config.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Export directory, overriding the config.
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Answer yes to every confirmation.
    #[arg(short, long)]
    yes: bool,
}

/// Asks on the terminal.
struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    if let Some(catalog) = args.catalog.clone() {
        config.catalog_path = catalog;
    }
    if let Some(dir) = args.export_dir.clone() {
        config.export_dir = dir;
    }
    config.validate().context("validate config")?;

    let renderer = TextRenderer::new(io::stdout(), config.palette.clone());
    let mut editor = Editor::new(&config, Box::new(renderer));
    let mut catalog = JsonFileCatalog::new(&config.catalog_path);
    let mut confirm: Box<dyn Confirm> = if args.yes || args.script.is_none() {
        // stdin is the command stream, so it can't also answer prompts
        Box::new(AlwaysConfirm)
    } else {
        Box::new(PromptConfirm)
    };

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open script: {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    for (number, line) in input.lines().enumerate() {
        let line = line.context("read command")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match run_command(line, &mut editor, &mut catalog, &config, confirm.as_mut()) {
            Ok(true) => {}
            Ok(false) => break,
            // a bad command is reported, not fatal
            Err(e) => eprintln!("line {}: {e:#}", number + 1),
        }
    }

    Ok(())
}

fn cell_arg(parts: &[&str]) -> anyhow::Result<Option<CellPos>> {
    let [row, col] = parts else {
        bail!("expected <row> <col>");
    };
    let row: i64 = row.parse().context("row")?;
    let col: i64 = col.parse().context("col")?;
    Ok(CellPos::from_signed(row, col))
}

/// Returns `Ok(false)` on `quit`.
fn run_command(
    line: &str,
    editor: &mut Editor,
    catalog: &mut JsonFileCatalog,
    config: &EditorConfig,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<bool> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (command, rest) = parts.split_first().context("empty command")?;
    let name = rest.join(" ");

    match *command {
        "down" => {
            editor.handle(PointerEvent::Down(cell_arg(rest)?))?;
        }
        "move" => {
            editor.handle(PointerEvent::Move(cell_arg(rest)?))?;
        }
        "up" => {
            editor.handle(PointerEvent::Up)?;
        }
        "tool" => {
            let tool: ToolKind = name.parse().map_err(anyhow::Error::msg)?;
            editor.select_tool(tool);
        }
        "color" => match name.parse::<usize>() {
            Ok(index) => editor.select_palette_index(index)?,
            Err(_) => editor.select_color(BeadColor::parse(&name)?),
        },
        "undo" => {
            if !editor.undo() {
                println!("nothing to undo");
            }
        }
        "redo" => {
            if !editor.redo() {
                println!("nothing to redo");
            }
        }
        "clear" => {
            editor.clear_all(confirm);
        }
        "save" => editor.save_to_catalog(catalog, &name)?,
        "open" => {
            editor.open_from_catalog(&*catalog, &name, confirm)?;
        }
        "delete" => {
            if !confirm.confirm(&format!("Delete \"{name}\"?")) {
                return Ok(true);
            }
            if !catalog.delete(&name)? {
                println!("no saved project named '{name}'");
            }
        }
        "list" => {
            let names = catalog.list()?;
            if names.is_empty() {
                println!("no saved projects");
            }
            for name in names {
                println!("{name}");
            }
        }
        "export" => {
            let path = editor.export_file(&config.export_dir)?;
            println!("{}", path.display());
        }
        "import" => {
            editor.import_file(&name, confirm)?;
        }
        "print" => println!("{}\n", board_to_string(editor.palette(), editor.grid())),
        "quit" | "exit" => return Ok(false),
        other => bail!("unknown command '{other}'"),
    }

    Ok(true)
}
