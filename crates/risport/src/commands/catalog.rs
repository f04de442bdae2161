//! `risport models` / `risport status-reasons`: offline catalog listings.

use risport_api::catalog;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalOpts, ModelsArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Clone, Copy, Serialize, Tabled)]
struct Entry {
    #[tabled(rename = "Code")]
    code: u32,
    #[tabled(rename = "Name")]
    name: &'static str,
}

fn entries(table: &'static [(u32, &'static str)], filter: Option<&str>) -> Vec<Entry> {
    let needle = filter.map(str::to_lowercase);
    table
        .iter()
        .filter(|(_, name)| {
            needle
                .as_deref()
                .is_none_or(|needle| name.to_lowercase().contains(needle))
        })
        .map(|&(code, name)| Entry { code, name })
        .collect()
}

fn print(entries: &[Entry], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render(
        global.output,
        entries,
        <[Entry]>::to_vec,
        |e| e.iter().map(|entry| entry.code.to_string()).collect(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn handle_models(args: &ModelsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    print(&entries(catalog::models(), args.filter.as_deref()), global)
}

pub fn handle_status_reasons(global: &GlobalOpts) -> Result<(), CliError> {
    print(&entries(catalog::status_reasons(), None), global)
}
