//! The `academy init` command.

use std::path::Path;

use anyhow::Result;

use academy_core::config::LOCAL_CONFIG_FILE;

pub fn execute() -> Result<()> {
    if Path::new(LOCAL_CONFIG_FILE).exists() {
        println!("{LOCAL_CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(LOCAL_CONFIG_FILE, SAMPLE_CONFIG)?;
        println!("Created {LOCAL_CONFIG_FILE}");
    }

    std::fs::create_dir_all("content")?;
    let sample_path = Path::new("content/pl1-origins.toml");
    if sample_path.exists() {
        println!("content/pl1-origins.toml already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_COURSE)?;
        println!("Created content/pl1-origins.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: academy validate content");
    println!("  2. Run: academy outline --course pl1-origins");
    println!("  3. Run: academy quiz --course pl1-origins --chapter 1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# academy configuration

content_dir = "./content"
theme = "light"
check_delay_ms = 800
min_submission_len = 10
"#;

const SAMPLE_COURSE: &str = r#"[course]
id = "pl1-origins"

[[chapters]]
theory = """
PL/I (Programming Language One) was introduced by IBM in the mid-1960s
to serve both scientific and business programming on System/360.
"""

[[chapters.quiz]]
id = 1
prompt = "Which company introduced PL/I?"
options = ["DEC", "IBM", "Sperry", "Burroughs"]
correct_index = 1

[[chapters.quiz]]
id = 2
prompt = "PL/I was designed for which kinds of work?"
options = ["Scientific only", "Business only", "Both scientific and business"]
correct_index = 2

[[chapters.resources]]
title = "Enterprise PL/I for z/OS documentation"
url = "https://www.ibm.com/docs/en/epfz"
"#;
