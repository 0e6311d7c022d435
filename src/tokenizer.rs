use std::io::{self, BufReader, Bytes, Read};

/// Lazy stream of words read from a byte source.
///
/// A word is a maximal run of ASCII letters, digits or `'`. Every other byte
/// is a separator. The stream ends at end of input and cannot be restarted.
pub struct Words<R: Read> {
    bytes: Bytes<BufReader<R>>,
    done: bool,
}

pub fn words<R: Read>(reader: R) -> Words<R> {
    Words {
        bytes: BufReader::new(reader).bytes(),
        done: false,
    }
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'\''
}

impl<R: Read> Iterator for Words<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut word = String::new();
        loop {
            match self.bytes.next() {
                Some(Ok(byte)) if is_word_byte(byte) => word.push(byte as char),
                Some(Ok(_)) if word.is_empty() => continue,
                Some(Ok(_)) => return Some(Ok(word)),
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    return (!word.is_empty()).then_some(Ok(word));
                }
            }
        }
    }
}
