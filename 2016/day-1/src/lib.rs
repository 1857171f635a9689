pub mod parser;
pub mod part1;
pub mod part2;
pub mod walk;
