use miette::*;

use crate::{parser::parse_instructions, walk};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let instructions = parse_instructions(input)?;

    let state = walk::run(&instructions);
    let distance = state.report().first_repeat_distance.ok_or_else(|| {
        miette!(
            code = "walk::no_repeat",
            "no location was visited twice; the walk ended at {}",
            state.position()
        )
    })?;

    Ok(distance.to_string())
}
