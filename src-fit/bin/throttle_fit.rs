//! throttle_fit: fit the throttle model with swarm and pollination optimizers
//!
//! Copyright (C) 2025 Pierre Aubert pierre(at)spinorama(dot)org
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::error::Error;
use std::process;

use clap::Parser;
use throttle_fit::{Args, cli, init_logging, workflow};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if args.algo_list {
        cli::display_algorithm_list();
        process::exit(0);
    }
    init_logging();

    let data_path = args.data.as_ref().ok_or("--data is required")?;
    let data = workflow::load_dataset(data_path)?;
    let report = workflow::run_experiment(&args, data)?;
    workflow::print_summary(&report);

    if let Some(dir) = &args.output {
        let written = workflow::write_records(&report, dir)?;
        println!("\nrecords written to {} ({} files)", dir.display(), written.len());
    }
    Ok(())
}
