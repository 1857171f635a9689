use miette::*;

use crate::{parser::parse_instructions, walk};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let instructions = parse_instructions(input)?;

    let distances = walk::run(&instructions).report();

    Ok(distances.final_distance.to_string())
}
