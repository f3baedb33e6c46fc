use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use eg_core::TemplateKind;

pub fn run(library: &Path, kind: Option<&str>) -> Result<(), String> {
    let lib = super::load_library(library)?;
    let kind = kind.map(parse_kind).transpose()?;

    let templates: Vec<_> = lib
        .templates()
        .filter(|t| kind.is_none_or(|k| t.kind() == k))
        .collect();

    if templates.is_empty() {
        println!("  No templates found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Kind", "Rank", "Notes"]);

    for template in &templates {
        let notes = if template.notes.chars().count() > 60 {
            let cut: String = template.notes.chars().take(57).collect();
            format!("{cut}...")
        } else if template.notes.is_empty() {
            "-".to_string()
        } else {
            template.notes.clone()
        };
        table.add_row(vec![
            template.id.to_string(),
            template.name.clone(),
            template.kind().to_string(),
            template.rank_title().to_string(),
            notes,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} templates", templates.len());
    Ok(())
}

fn parse_kind(kind: &str) -> Result<TemplateKind, String> {
    match kind.to_lowercase().as_str() {
        "standard" => Ok(TemplateKind::Standard),
        "spirit" => Ok(TemplateKind::Spirit),
        "elemental" => Ok(TemplateKind::Elemental),
        "cult" => Ok(TemplateKind::Cult),
        other => Err(format!("unknown template kind: \"{other}\"")),
    }
}
