pub mod composer;
pub mod config;
pub mod dialog;
pub mod engine;
pub mod generator;
pub mod lexicon;
