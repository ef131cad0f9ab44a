pub mod lineup;
pub mod roster;
pub mod form;
pub mod stats;
pub mod display;
pub mod web;
