use minesweeper_csp as ms;
use wasm_bindgen::prelude::*;

fn to_board(width: usize, height: usize, cells: &[i8]) -> Result<ms::Board<2>, String> {
    // -1 is hidden, anything else is a revealed count.
    let cells = cells
        .iter()
        .map(|&n| match n {
            -1 => Ok(ms::Cell::Hidden),
            0.. => Ok(ms::Cell::Revealed(n as u8)),
            _ => Err(format!("invalid cell value {n}")),
        })
        .collect::<Result<Vec<_>, _>>()?;
    ms::Board::from_cells([height, width], cells).map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn create_board(size: u8, mines: u8, reveal_probability: f64) -> Result<Vec<i8>, String> {
    console_error_panic_hook::set_once();

    let mut rng = rand::rng();
    let sampled = ms::sample_board(
        &mut rng,
        [size as usize, size as usize],
        mines as usize,
        reveal_probability,
    )
    .map_err(|e| e.to_string())?;

    Ok(sampled
        .board
        .cells()
        .iter()
        .map(|cell| match cell {
            ms::Cell::Hidden => -1,
            ms::Cell::Revealed(n) => *n as i8,
        })
        .collect())
}

/// Compiles a board and returns the network in its `bcs` encoding.
#[wasm_bindgen]
pub fn build_network(width: usize, height: usize, cells: Vec<i8>) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let board = to_board(width, height, &cells)?;
    let model = ms::build(&board, &ms::ModelOptions::default()).map_err(|e| e.to_string())?;
    model.network.to_bytes().map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn constraint_count(bts: Vec<u8>) -> Result<usize, String> {
    console_error_panic_hook::set_once();

    let network = ms::Network::from_bytes(&bts).map_err(|e| e.to_string())?;
    Ok(network.constraints().len())
}
