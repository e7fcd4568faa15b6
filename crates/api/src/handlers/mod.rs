pub mod boards;
pub mod cards;
pub mod columns;
pub mod sync;
