/**
 * StateStore Compiler CLI - ssc
 *
 * Generates `Abs<Target>` base classes for `@StateStore` declarations
 */
use statestore_compiler_cli::main_entry::main_entry;
use std::process;

fn main() {
    process::exit(main_entry(std::env::args()));
}
