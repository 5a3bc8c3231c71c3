use classpack_core::GraphSnapshot;
use std::path::PathBuf;

pub fn run(path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = GraphSnapshot::from_path(&path)?;
    let base = std::path::absolute(&path)?
        .parent()
        .map(|p| p.to_path_buf());
    let graph = snapshot.into_graph(base.as_deref())?;

    let unlocated = snapshot
        .classes
        .values()
        .filter(|entry| entry.location.is_none())
        .count();
    let locations = graph.distinct_locations();
    let local = locations.iter().filter(|l| l.is_file_scheme()).count();

    println!("Graph: {}", path.display());
    println!("Classes: {}", graph.class_count());
    println!("Edges: {}", graph.edge_count());
    println!("Locations: {} ({} local)", locations.len(), local);
    println!("Classes without location: {}", unlocated);

    let dangling = graph.dangling_references();
    if !dangling.is_empty() {
        println!("\nReferences to unknown classes:");
        for class in dangling.iter().take(20) {
            println!(" - {}", class);
        }
        if dangling.len() > 20 {
            println!(" ... and {} more", dangling.len() - 20);
        }
    }

    Ok(())
}
