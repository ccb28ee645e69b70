// Application layer: wires config, adapters and core for the CLI.

pub mod runner;
