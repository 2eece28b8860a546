pub mod desk;
pub mod intake;
pub mod ledger;
pub mod lifecycle;
pub mod settlement;
pub mod simulation;
