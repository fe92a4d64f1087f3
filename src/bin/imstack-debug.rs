use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use imstack_layout::{Answer, LayoutSnapshot, NodeKind, NodeRecord, Scene, StackLayout};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Parser)]
#[command(name = "imstack-debug")]
#[command(about = "Replays a layout scene and prints the resolved tree")]
struct Args {
    /// Path to the scene description (.json)
    scene_file: String,

    /// Number of frames to run; rects settle from the second frame on
    #[arg(long, default_value_t = 2)]
    frames: usize,

    /// Output format (tree, json, detailed)
    #[arg(long, default_value = "tree")]
    format: String,

    /// Override the root width from the scene
    #[arg(long)]
    width: Option<f32>,

    /// Override the root height from the scene
    #[arg(long)]
    height: Option<f32>,

    /// Save output to file instead of stdout
    #[arg(long)]
    output: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    if !Path::new(&args.scene_file).exists() {
        anyhow::bail!("Scene file not found: {}", args.scene_file);
    }

    info!("Loading scene: {}", args.scene_file);
    let text = fs::read_to_string(&args.scene_file)
        .with_context(|| format!("Failed to read scene file: {}", args.scene_file))?;
    let mut scene = Scene::from_json(&text).context("Failed to parse scene")?;

    if args.width.is_some() || args.height.is_some() {
        let base = scene.config().root_size;
        scene.root_size = Some([args.width.unwrap_or(base.x), args.height.unwrap_or(base.y)]);
    }

    let (layout, answers) = scene
        .run(args.frames)
        .with_context(|| format!("Layout failed for scene: {}", args.scene_file))?;
    let snapshot = layout.snapshot();

    let output_text = match args.format.as_str() {
        "tree" => generate_tree_output(&snapshot),
        "json" => generate_json_output(&snapshot, &answers),
        "detailed" => generate_detailed_output(&layout, &snapshot, &answers),
        _ => anyhow::bail!("Unknown format: {}. Use 'tree', 'json', or 'detailed'", args.format),
    }?;

    if let Some(output_file) = args.output {
        fs::write(&output_file, output_text)
            .with_context(|| format!("Failed to write to file: {}", output_file))?;
        info!("Output written to: {}", output_file);
    } else {
        print!("{}", output_text);
    }

    Ok(())
}

fn generate_tree_output(snapshot: &LayoutSnapshot) -> Result<String> {
    let mut output = String::new();
    if snapshot.is_empty() {
        output.push_str("No layout has been resolved\n");
        return Ok(output);
    }

    let records: Vec<&NodeRecord> = snapshot.iter().collect();
    for (index, record) in records.iter().enumerate() {
        output.push_str(&tree_prefix(&records, index));
        output.push_str(&describe(record));
        output.push('\n');
    }
    Ok(output)
}

/// Box-drawing prefix for the record at `index` of a pre-order listing.
fn tree_prefix(records: &[&NodeRecord], index: usize) -> String {
    let depth = records[index].depth;
    if depth == 0 {
        return String::new();
    }

    // A level keeps its vertical bar while a later sibling is still coming.
    let has_later_sibling = |from: usize, level: usize| {
        records[from + 1..]
            .iter()
            .take_while(|record| record.depth >= level)
            .any(|record| record.depth == level)
    };

    let mut prefix = String::new();
    let mut ancestor = index;
    let mut columns = Vec::with_capacity(depth);
    for level in (1..=depth).rev() {
        while records[ancestor].depth > level {
            ancestor -= 1;
        }
        columns.push(has_later_sibling(ancestor, level));
    }
    columns.reverse();

    for (level, &open) in columns.iter().enumerate() {
        let last_column = level + 1 == depth;
        prefix.push_str(match (last_column, open) {
            (true, true) => "├── ",
            (true, false) => "└── ",
            (false, true) => "│   ",
            (false, false) => "    ",
        });
    }
    prefix
}

fn describe(record: &NodeRecord) -> String {
    let mut line = match (record.kind, record.orientation) {
        (NodeKind::Group, Some(orientation)) => format!("Group[{}]", orientation),
        _ => "Entry".to_string(),
    };
    line.push_str(&format!(" #{}", record.id));
    if let Some(tag) = &record.tag {
        line.push_str(&format!(" \"{}\"", tag));
    }
    line.push_str(&format!(
        " pos:({:.0},{:.0}) size:({:.0},{:.0})",
        record.rect.x, record.rect.y, record.rect.width, record.rect.height
    ));
    line
}

fn generate_json_output(snapshot: &LayoutSnapshot, answers: &[Answer]) -> Result<String> {
    let report = serde_json::json!({
        "snapshot": snapshot,
        "answers": answers,
    });
    let mut output = serde_json::to_string_pretty(&report).context("Failed to serialize layout")?;
    output.push('\n');
    Ok(output)
}

fn generate_detailed_output(layout: &StackLayout, snapshot: &LayoutSnapshot, answers: &[Answer]) -> Result<String> {
    let mut output = String::new();

    output.push_str("=== IMSTACK LAYOUT ANALYSIS ===\n\n");

    output.push_str("ENGINE:\n");
    output.push_str(&format!("  Frames: {}\n", layout.frame()));
    output.push_str(&format!("  Root size: {}\n", format_size(layout.root_size())));
    output.push_str(&format!("  Nodes: {}\n", snapshot.len()));
    let stats = layout.pool_stats();
    output.push_str(&format!(
        "  Entry pool: {} allocated, {} reused, {} idle\n",
        stats.entries.allocated, stats.entries.reused, stats.entries.idle
    ));
    output.push_str(&format!(
        "  Group pool: {} allocated, {} reused, {} idle\n",
        stats.groups.allocated, stats.groups.reused, stats.groups.idle
    ));
    output.push('\n');

    output.push_str("RESOLVED TREE:\n");
    output.push_str(&generate_tree_output(snapshot)?);
    output.push('\n');

    output.push_str("ANSWERS (last frame):\n");
    for answer in answers {
        let path: Vec<String> = answer.path.iter().map(ToString::to_string).collect();
        output.push_str(&format!("  /{} -> {}", path.join("/"), answer.rect));
        if let Some(tag) = &answer.tag {
            output.push_str(&format!(" \"{}\"", tag));
        }
        output.push('\n');
    }

    output.push_str("\n=== END ANALYSIS ===\n");
    Ok(output)
}

fn format_size(size: Vec2) -> String {
    format!("{:.0} x {:.0}", size.x, size.y)
}
