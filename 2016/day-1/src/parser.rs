use chumsky::prelude::*;
use miette::*;

use crate::walk::{Instruction, Operation, Side};

/// A single `L`/`R` followed by one or more decimal digits, e.g. `R5` or `L012`.
fn instruction<'a>() -> impl Parser<'a, &'a str, Instruction, extra::Err<Rich<'a, char>>> {
    let side = choice((just('L').to(Side::Left), just('R').to(Side::Right)));

    // `text::int` rejects leading zeros, so take the raw digits instead.
    let distance = text::digits(10)
        .to_slice()
        .try_map(|digits: &str, span| {
            digits
                .parse::<u32>()
                .map_err(|e| Rich::custom(span, format!("distance {digits} is too large: {e}")))
        });

    side.then(distance)
        .map(|(side, distance)| Instruction { side, distance })
}

/// The puzzle input: tokens separated by commas and/or whitespace.
fn instructions<'a>() -> impl Parser<'a, &'a str, Vec<Instruction>, extra::Err<Rich<'a, char>>> {
    let separator = just(',')
        .padded()
        .ignored()
        .or(text::whitespace().at_least(1));

    instruction()
        .separated_by(separator)
        .allow_trailing()
        .collect::<Vec<_>>()
        .padded()
        .then_ignore(end())
}

/// Folds chumsky's errors into one diagnostic pointing at the offending text.
fn parse_failure(source: &str, errors: Vec<Rich<'_, char>>) -> Report {
    let labels = errors
        .iter()
        .map(|e| {
            let span = e.span();
            LabeledSpan::at(span.start..span.end, e.to_string())
        })
        .collect::<Vec<_>>();

    miette!(
        code = "walk::parse",
        labels = labels,
        help = "instructions look like `R5, L12`",
        "failed to parse instructions"
    )
    .with_source_code(source.to_string())
}

pub fn parse_instructions(input: &str) -> Result<Vec<Instruction>> {
    instructions()
        .parse(input)
        .into_result()
        .map_err(|e| parse_failure(input, e))
}

pub fn parse_instruction(token: &str) -> Result<Instruction> {
    instruction()
        .then_ignore(end())
        .parse(token)
        .into_result()
        .map_err(|e| parse_failure(token, e))
}

/// Turns a token such as `R5` into the turn and the move it stands for.
pub fn instruction_to_operations(token: &str) -> Result<[Operation; 2]> {
    parse_instruction(token).map(Instruction::operations)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn code(err: &Report) -> Option<String> {
        err.code().map(|c| c.to_string())
    }

    #[rstest]
    #[case("R5", Side::Right, 5)]
    #[case("L12", Side::Left, 12)]
    #[case("R0", Side::Right, 0)]
    #[case("L007", Side::Left, 7)]
    fn token_becomes_turn_then_move(
        #[case] token: &str,
        #[case] side: Side,
        #[case] distance: u32,
    ) -> Result<()> {
        assert_eq!(
            [Operation::Turn(side), Operation::Move(distance)],
            instruction_to_operations(token)?
        );
        Ok(())
    }

    #[rstest]
    #[case("")]
    #[case("5")]
    #[case("R")]
    #[case("Rx")]
    #[case("U5")]
    #[case("r5")]
    #[case("R-5")]
    #[case("R5 ")]
    #[case("R5L3")]
    #[case("R99999999999")]
    fn malformed_tokens_are_rejected(#[case] token: &str) {
        let err = instruction_to_operations(token).unwrap_err();
        assert_eq!(Some("walk::parse".to_string()), code(&err));
    }

    #[test]
    fn parses_puzzle_layout() -> Result<()> {
        let input = "R5, L5,\nR5,R3\n";
        let parsed = parse_instructions(input)?;
        assert_eq!(
            vec![
                Instruction { side: Side::Right, distance: 5 },
                Instruction { side: Side::Left, distance: 5 },
                Instruction { side: Side::Right, distance: 5 },
                Instruction { side: Side::Right, distance: 3 },
            ],
            parsed
        );
        Ok(())
    }

    #[test]
    fn whitespace_separated_tokens() -> Result<()> {
        assert_eq!(3, parse_instructions("  R1 L2\tR3  ")?.len());
        Ok(())
    }

    #[test]
    fn empty_input_is_empty_walk() -> Result<()> {
        assert!(parse_instructions("")?.is_empty());
        assert!(parse_instructions("\n")?.is_empty());
        Ok(())
    }

    #[test]
    fn bad_token_in_list_is_labelled() {
        let err = parse_instructions("R5, X3, L2").unwrap_err();
        assert_eq!(Some("walk::parse".to_string()), code(&err));
        let labels = err.labels().map(|l| l.collect::<Vec<_>>()).unwrap_or_default();
        assert!(labels.iter().any(|l| l.offset() == 4));
    }
}
