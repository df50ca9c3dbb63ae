use anyhow::Context;
use minesweeper_csp::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // --- 1. Sample a board ---
    let mut rng = rand::rng();
    let sampled = sample_board(&mut rng, [8, 12], 15, 0.4)?;

    println!("--- Minesweeper Constraint Model ---");
    println!("Board ({} revealed cells):", sampled.board.revealed_count());
    print_board(&sampled.board);

    // --- 2. Compile it ---
    let model = build(&sampled.board, &ModelOptions::default()).context("model construction")?;
    let network = &model.network;

    println!(
        "{}: {} variables, {} constraints, {} cells safe by isolation",
        network.name(),
        network.variables().len(),
        network.constraints().len(),
        model.isolated.len()
    );

    let largest = network
        .constraints()
        .iter()
        .max_by_key(|c| c.satisfying_tuples().len());
    if let Some(constraint) = largest {
        println!(
            "Largest table: {} ({} mines over {} cells, {} tuples)",
            constraint.name(),
            constraint.hint(),
            constraint.scope().len(),
            constraint.satisfying_tuples().len()
        );
    }

    // --- 3. Check the hidden layout against every table ---
    let solution = sampled.solution();
    for constraint in network.constraints() {
        let assignment: Vec<Value> = constraint.scope().iter().map(|&id| solution[id]).collect();
        if !constraint.is_satisfied_by(&assignment) {
            anyhow::bail!("{} rejects the sampled layout", constraint.name());
        }
    }
    println!("The sampled layout satisfies every constraint.");

    println!("\nLayout:");
    print_solution(&sampled.board, &solution);

    let bytes = network.to_bytes()?;
    println!("Encoded network: {} bytes", bytes.len());

    Ok(())
}

fn print_board(board: &Board<2>) {
    let [height, width] = board.dims();

    // Print header
    print!("   ");
    for x in 0..width {
        print!("{:^3}", x);
    }
    println!("\n  +{}", "---".repeat(width));

    // Print rows
    for y in 0..height {
        print!("{:^2}|", y);
        for x in 0..width {
            let display = match board.get([y, x]) {
                Some(Cell::Revealed(n)) => format!(" {} ", n),
                _ => " ■ ".to_string(),
            };
            print!("{}", display);
        }
        println!();
    }
    println!();
}

fn print_solution(board: &Board<2>, solution: &[Value]) {
    let [_, width] = board.dims();
    for row in solution.chunks(width.max(1)) {
        let line: String = row.iter().map(|v| format!(" {} ", v.symbol())).collect();
        println!("  |{}|", line);
    }
}
