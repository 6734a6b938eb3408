use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use yahtzee_core::{Category, Roll, Section, score, score_all};
use yahtzee_session::suggest_category;

pub fn run(dice: &[u8], category: Option<&str>, json: bool) -> Result<(), String> {
    let roll = Roll::from_faces(1, dice).map_err(|e| e.to_string())?;
    let faces = roll.faces();

    if let Some(name) = category {
        let category = parse_category(name)?;
        let points = score(category, &faces);
        if json {
            let out = serde_json::json!({ "category": category.label(), "points": points });
            println!("{out}");
        } else {
            println!("{points}");
        }
        return Ok(());
    }

    let scores = score_all(&faces);
    if json {
        let map: serde_json::Map<String, serde_json::Value> = scores
            .iter()
            .map(|(c, points)| (c.label().to_string(), (*points).into()))
            .collect();
        let out = serde_json::to_string_pretty(&map)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Section", "Score", "Rule"]);
    for (category, points) in scores {
        let section = match category.section() {
            Section::Upper => "upper",
            Section::Lower => "lower",
        };
        table.add_row(vec![
            category.label().to_string(),
            section.to_string(),
            points.to_string(),
            category.description().to_string(),
        ]);
    }

    println!("  Dice: {}", roll.to_string().bold());
    println!("{table}");

    if let Some((best, points)) = scores.iter().max_by_key(|(_, p)| *p) {
        println!("  Best: {} for {points}", best.label().green());
    }

    Ok(())
}

fn parse_category(name: &str) -> Result<Category, String> {
    Category::from_label(name).ok_or_else(|| match suggest_category(name) {
        Some(c) => format!("unknown category '{name}' (did you mean '{}'?)", c.label()),
        None => format!("unknown category '{name}'"),
    })
}
