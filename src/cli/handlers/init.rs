use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::config_io;
use crate::io::data_dir::DataDir;

const CONFIG_TOML_TEMPLATE: &str = r##"# todo configuration
# Every setting is optional; delete a line to get the default back.

[storage]
# Tasks are saved to <data dir>/<key>.json
key = "mui_todo_tasks_v1"

[ui]
show_key_hints = true
# Sections open when the TUI starts
expanded = ["in-progress"]

# [ui.colors]
# background = "#FFFFFF"
# text = "#212121"
# dim = "#757575"
# highlight = "#1976D2"
# header_bg = "#1976D2"
# header_fg = "#FFFFFF"
# section_bg = "#F3F6F9"
# match_bg = "#FFF59D"
# red = "#D32F2F"
"##;

pub fn cmd_init(data: &DataDir, args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = config_io::config_path(&data.root);
    if path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }

    fs::create_dir_all(&data.root)?;
    fs::write(&path, CONFIG_TOML_TEMPLATE)?;
    println!("wrote {}", path.display());
    Ok(())
}
