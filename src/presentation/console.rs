// Console event source - Turns stdin lines into UI events
use crate::application::dashboard_controller::UiEvent;
use crate::presentation::commands::{parse_command, Command, HELP};
use futures::stream::Stream;
use futures::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_stream::wrappers::LinesStream;

/// Stream of UI events read line by line. Ends on `quit` or end of input.
pub fn event_stream<R>(reader: R) -> impl Stream<Item = UiEvent>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = LinesStream::new(reader.lines());

    async_stream::stream! {
        while let Some(line) = lines.next().await {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Failed to read command: {}", e);
                    break;
                }
            };

            match parse_command(&line) {
                Ok(Some(Command::Event(event))) => yield event,
                Ok(Some(Command::Help)) => println!("{}", HELP),
                Ok(Some(Command::Quit)) => break,
                Ok(None) => {}
                Err(e) => eprintln!("{} ({})", e, HELP),
            }
        }
    }
}
