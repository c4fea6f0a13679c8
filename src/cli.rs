use anyhow::{anyhow, Result};

pub const USAGE: &str = "\
usage: blockfall [--seed <n>]

  --seed <n>   start from a fixed piece sequence (u32)
  -h, --help   print this message

keys: arrows/wasd/hjkl move, up rotates, space drops,
      p pauses, r restarts, m mutes, q quits";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayConfig {
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(PlayConfig),
    Help,
}

/// Parse arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut config = PlayConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                let seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                config.seed = Some(seed);
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Command::Play(config))
}
