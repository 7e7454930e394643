//! The `drill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create drill.toml
    if std::path::Path::new("drill.toml").exists() {
        println!("drill.toml already exists, skipping.");
    } else {
        std::fs::write("drill.toml", SAMPLE_CONFIG)?;
        println!("Created drill.toml");
    }

    // Create example dataset
    std::fs::create_dir_all("db")?;
    let example_path = std::path::Path::new("db/adjectives.csv");
    if example_path.exists() {
        println!("db/adjectives.csv already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ADJECTIVES)?;
        println!("Created db/adjectives.csv");
    }

    println!("\nNext steps:");
    println!("  1. Add words to db/adjectives.csv (or nouns.csv, udsagnsord.csv)");
    println!("  2. Run: drill validate adjectives");
    println!("  3. Run: drill run adjectives");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# drill configuration

input_dir = "db"
output_dir = "tmp"
color = true

# Extra word classes can be declared next to the built-in
# adjectives, nouns and verbs:
#
# [classes.pronouns]
# title = "Stedord"
# dataset = "pronouns.csv"
# columns = ["English", "Subjekt", "Objekt", "Ejefald"]
# prompt = 1
# mode = "unique"
#
# [[classes.pronouns.answers]]
# column = 2
# question = "Objekt (me)"
#
# [[classes.pronouns.answers]]
# column = 3
# question = "Ejefald (my)"
"#;

const EXAMPLE_ADJECTIVES: &str = "\
English,Positiv,Komparativ,Superlativ
good,god,bedre,bedst
big,stor,større,størst
small,lille,mindre,mindst
old,gammel,ældre,ældst
young,ung,yngre,yngst
";
