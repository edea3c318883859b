mod engine;
mod scenario_files;
