use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/brickset_sample.jsonl".to_string());

    let mut writer = BufWriter::new(File::create(&output_file)?);

    println!("🔧 Generating sample catalog: {}\n", output_file);

    // Distinct sets
    println!("Adding distinct sets...");
    writeln!(writer, "{}", json!({"name": "Millennium Falcon", "number": "75192-1", "pieces": 7541, "theme": "Star Wars"}))?;
    writeln!(writer, "{}", json!({"name": "Taj Mahal", "number": "10256-1", "pieces": 5923, "theme": "Creator Expert"}))?;
    writeln!(writer, "{}", json!({"name": "Yellow Castle", "number": "375-2", "pieces": 767, "theme": "Castle"}))?;
    writeln!(writer, "{}", json!({"name": "Galaxy Explorer", "number": "497-1", "pieces": 338, "theme": "Space"}))?;

    // Same name, different sets (name-counts > 1)
    println!("Adding repeated names...");
    writeln!(writer, "{}", json!({"name": "Heart", "number": "40462-1", "pieces": 166, "theme": "Seasonal"}))?;
    writeln!(writer, "{}", json!({"name": "Heart", "number": "41091-1", "pieces": 40, "theme": "Friends"}))?;
    writeln!(writer, "{}", json!({"name": "Heart", "number": "853804-1", "pieces": 72, "theme": "Gear"}))?;

    // Same number twice (number-pieces keeps the later entry)
    println!("Adding a re-released number...");
    writeln!(writer, "{}", json!({"name": "Tower Bridge", "number": "10214-1", "pieces": 4287}))?;
    writeln!(writer, "{}", json!({"name": "Tower Bridge", "number": "10214-1", "pieces": 4295}))?;

    // Case variations (exists is case-sensitive)
    println!("Adding case variations...");
    writeln!(writer, "{}", json!({"name": "heart", "number": "5004049-1", "pieces": 12}))?;
    writeln!(writer, "{}", json!({"name": "HEART", "number": "5005657-1", "pieces": 9}))?;

    // No piece count (loads as 0)
    println!("Adding a set without a piece count...");
    writeln!(writer, "{}", json!({"name": "Collectable Minifigures", "number": "71000-0"}))?;

    writer.flush()?;

    println!("\n✓ Wrote 12 sets");
    println!("\nTry:");
    println!("  brickset --data {} report", output_file);
    println!("  brickset --data {} name-counts", output_file);

    Ok(())
}
