//! Loading a small edge list and running every query on it
//!
//! Run with: cargo run --example sample_graph

use edgescope::GraphSession;
use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🦀 edgescope example\n");

    // 1. Write a tiny SNAP-style edge list
    println!("📝 Writing edge list...");
    let path = std::env::temp_dir().join("edgescope_sample.txt");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "# binary tree with a tail")?;
    for (u, v) in [(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6), (3, 7)] {
        writeln!(file, "{u} {v}")?;
    }
    drop(file);
    println!("  ✅ Wrote {}\n", path.display());

    // 2. Load it
    println!("📊 Loading...");
    let mut session = GraphSession::new();
    session.load(&path)?;
    println!(
        "  ✅ Graph built: {} nodes, {} edges\n",
        session.node_count()?,
        session.edge_count()?
    );

    // 3. Query
    println!("🔍 Querying graph...");
    println!("  degree(0)    = {}", session.degree(0)?);
    println!("  neighbors(1) = {:?}", session.neighbors(1)?);

    let hub = session.max_degree_node()?;
    println!("  max degree   = node {hub} ({})", session.degree(i64::from(hub))?);

    for depth in 0..=3 {
        println!("  bfs(0, {depth})    = {:?}", session.bfs(0, depth)?);
    }

    // 4. Errors are values
    println!("\n⚠️  Out-of-range query: {}", session.degree(-1).unwrap_err());

    std::fs::remove_file(&path)?;
    println!("\n✨ Example complete!");

    Ok(())
}
