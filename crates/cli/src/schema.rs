use classpack_core::GraphSnapshot;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&GraphSnapshot::schema())?);
    Ok(())
}
