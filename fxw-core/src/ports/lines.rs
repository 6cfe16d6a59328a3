use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, Split};

/// A forward-only, pull-based source of raw text rows.
///
/// Each call yields the next line (without its terminator) until the source is
/// exhausted, at which point `Ok(None)` is returned. Lines are never replayed.
/// Callers abandon a source simply by not asking for more.
///
/// An `Err` means the source itself failed and nothing more can be read from
/// it. Content problems are never reported this way.
pub trait LineSource: Send {
    /// Pull the next line from the source.
    fn next_line(&mut self) -> impl Future<Output = std::io::Result<Option<String>>> + Send;
}

/// Lines of text read from any buffered async reader: a file, stdin, an HTTP
/// body or a byte slice.
///
/// Lines end at `\n`, and a trailing `\r` is dropped. Bytes that are not valid
/// UTF-8 are replaced with U+FFFD, so one badly encoded line reaches the
/// pipeline as a row of its own rather than ending the read.
///
/// # Examples
///
/// ```
/// # use fxw_core::ports::{LineSource as _, TextLines};
/// # tokio_test::block_on(async {
/// let mut lines = TextLines::new(&b"D1,USD\r\nD\xe92\n"[..]);
/// assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("D1,USD"));
/// assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("D\u{FFFD}2"));
/// assert_eq!(lines.next_line().await.unwrap(), None);
/// # });
/// ```
pub struct TextLines<R>(Split<R>);

impl<R: AsyncBufRead + Unpin> TextLines<R> {
    /// Split `reader` into lines
    pub fn new(reader: R) -> Self {
        Self(reader.split(b'\n'))
    }
}

impl<R: AsyncBufRead + Unpin + Send> LineSource for TextLines<R> {
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let Some(mut bytes) = self.0.next_segment().await? else {
            return Ok(None);
        };
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        Ok(Some(match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }))
    }
}
