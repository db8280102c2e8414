pub mod detile;
