mod init;
pub use init::cmd_init;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::data_dir::DataDir;
use crate::model::task::{NewTask, TaskPatch, TaskStatus};
use crate::ops::{group, search, task_ops};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let data = DataDir::open(cli.data_dir.as_deref())?;

    match cli.command {
        None => crate::tui::run(&data),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(&data, args),

            // Read commands
            Commands::List(args) => cmd_list(&data, args, json),
            Commands::Show(args) => cmd_show(&data, args, json),
            Commands::Search(args) => cmd_search(&data, args, json),
            Commands::Stats => cmd_stats(&data, json),

            // Write commands
            Commands::Add(args) => cmd_add(&data, args, json),
            Commands::Edit(args) => cmd_edit(&data, args),
            Commands::State(args) => {
                let status = parse_status(&args.status)?;
                cmd_set_status(&data, &args.id, status)
            }
            Commands::Start(args) => cmd_set_status(&data, &args.id, TaskStatus::InProgress),
            Commands::Done(args) => cmd_set_status(&data, &args.id, TaskStatus::Completed),
            Commands::Delete(args) => cmd_delete(&data, args),

            // Maintenance
            Commands::Diagnostics(args) => cmd_diagnostics(&data, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_status(s: &str) -> Result<TaskStatus, Box<dyn std::error::Error>> {
    Ok(s.parse::<TaskStatus>()?)
}

fn warn_unknown(id: &str) {
    eprintln!("warning: no task with id {}", id);
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(data: &DataDir, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let only = args.status.as_deref().map(parse_status).transpose()?;
    let store = data.open_store();
    let query = args.query.as_deref().unwrap_or("");
    let groups = group::project(store.tasks(), query);

    if json {
        match only {
            Some(status) => println!("{}", serde_json::to_string_pretty(groups.get(status))?),
            None => println!("{}", serde_json::to_string_pretty(&groups_to_json(&groups))?),
        }
    } else {
        print_lines(&format_groups(&groups, only));
    }
    Ok(())
}

fn cmd_show(data: &DataDir, args: IdArg, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = data.open_store();
    let task = task_ops::find_task_or_err(store.tasks(), &args.id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        print_lines(&format_task_detail(task));
    }
    Ok(())
}

fn cmd_search(
    data: &DataDir,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = data.open_store();
    let hits = search::filter_by_query(store.tasks(), &args.query);
    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else if hits.is_empty() {
        println!("No tasks");
    } else {
        for task in hits {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_stats(data: &DataDir, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = data.open_store();
    let groups = group::group_by_status(store.tasks());
    if json {
        println!("{}", serde_json::to_string_pretty(&stats_to_json(&groups))?);
    } else {
        print_lines(&format_stats(&groups));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(data: &DataDir, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let status = match args.status.as_deref() {
        Some(s) => parse_status(s)?,
        None => TaskStatus::Pending,
    };
    let payload = NewTask {
        title: args.title,
        description: args.description,
        date: args.date.unwrap_or_else(task_ops::today_str),
        status,
    };

    let mut store = data.open_store_for_edit();
    let task = store.add(payload);
    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("{}", task.id);
    }
    Ok(())
}

fn cmd_edit(data: &DataDir, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let patch = TaskPatch {
        title: args.title,
        description: if args.clear_description {
            Some(None)
        } else {
            args.description.map(Some)
        },
        date: args.date,
        status: args.status.as_deref().map(parse_status).transpose()?,
    };
    if patch.is_empty() {
        return Err("nothing to change (pass --title, --description, --date or --status)".into());
    }

    let mut store = data.open_store_for_edit();
    if store.update(&args.id, &patch) {
        println!("{} updated", args.id);
    } else {
        warn_unknown(&args.id);
    }
    Ok(())
}

fn cmd_set_status(
    data: &DataDir,
    id: &str,
    status: TaskStatus,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = data.open_store_for_edit();
    if store.set_status(id, status) {
        println!("{} -> {}", id, status);
    } else {
        warn_unknown(id);
    }
    Ok(())
}

fn cmd_delete(data: &DataDir, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = data.open_store_for_edit();
    match store.delete(&args.id) {
        Some(task) => println!("deleted {} {}", task.id, task.title),
        None => warn_unknown(&args.id),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

fn cmd_diagnostics(
    data: &DataDir,
    args: DiagnosticsCmd,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let log = data.diagnostics();

    if let Some(DiagnosticsAction::Prune(prune)) = args.action {
        let removed = log.prune(None, prune.all)?;
        println!("pruned {} entries", removed);
        return Ok(());
    }

    let entries = log.read_entries(Some(args.limit));
    if json {
        let values: Vec<_> = entries.iter().map(|e| e.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No diagnostics");
        return Ok(());
    }
    for entry in &entries {
        println!(
            "{} [{}] {}",
            entry
                .timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            entry.category,
            entry.description
        );
        for (key, value) in &entry.fields {
            println!("  {}: {}", key, value);
        }
    }
    Ok(())
}
