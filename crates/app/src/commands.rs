use anyhow::{anyhow, bail, Context, Result};
use jukelet_engine::Event;

pub const HELP: &str = "commands: play | pause | toggle | next | prev | select <n> | seek <0..1> | click <x> <width> | list | help | quit";

#[derive(Debug)]
pub enum Command {
    Event(Event),
    Redraw,
    Help,
    Quit,
}

/// Parses one line typed on stdin. Track numbers are the 1-based ones the
/// list prints.
pub fn parse_command(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        bail!("empty command");
    };
    let args: Vec<&str> = parts.collect();

    let cmd = match word.to_ascii_lowercase().as_str() {
        "play" => Command::Event(Event::Play),
        "pause" => Command::Event(Event::Pause),
        "toggle" | "p" => Command::Event(Event::TogglePlay),
        "next" | "n" => Command::Event(Event::Next),
        "prev" | "previous" | "b" => Command::Event(Event::Previous),
        "select" | "s" => {
            let n: usize = arg(&args, 0, "track number")?;
            if n == 0 {
                bail!("track numbers start at 1");
            }
            Command::Event(Event::Select(n - 1))
        }
        "seek" => Command::Event(Event::Seek(arg(&args, 0, "fraction")?)),
        "click" => Command::Event(Event::SeekClick {
            offset_x: arg(&args, 0, "offset")?,
            width: arg(&args, 1, "width")?,
        }),
        "list" | "ls" => Command::Redraw,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(anyhow!("unknown command `{other}`; {HELP}")),
    };
    Ok(cmd)
}

fn arg<T>(args: &[&str], idx: usize, what: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args
        .get(idx)
        .ok_or_else(|| anyhow!("missing {what}"))?;
    raw.parse::<T>()
        .with_context(|| format!("invalid {what}: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command};
    use jukelet_engine::Event;

    #[test]
    fn parses_control_words() {
        assert!(matches!(
            parse_command("next").unwrap(),
            Command::Event(Event::Next)
        ));
        assert!(matches!(
            parse_command("  Prev ").unwrap(),
            Command::Event(Event::Previous)
        ));
        assert!(matches!(parse_command("q").unwrap(), Command::Quit));
        assert!(matches!(parse_command("ls").unwrap(), Command::Redraw));
    }

    #[test]
    fn parses_arguments() {
        assert!(matches!(
            parse_command("select 3").unwrap(),
            Command::Event(Event::Select(2))
        ));
        match parse_command("click 30 120").unwrap() {
            Command::Event(Event::SeekClick { offset_x, width }) => {
                assert_eq!(offset_x, 30.0);
                assert_eq!(width, 120.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        match parse_command("seek 0.5").unwrap() {
            Command::Event(Event::Seek(f)) => assert_eq!(f, 0.5),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("").is_err());
        assert!(parse_command("select").is_err());
        assert!(parse_command("select 0").is_err());
        assert!(parse_command("seek half").is_err());
        assert!(parse_command("dance").is_err());
    }
}
