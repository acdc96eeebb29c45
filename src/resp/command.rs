use bytes::{Bytes, BytesMut};

use super::token::RESPToken;

/**
 * A request: command name followed by binary safe argument tokens.
 *
 * Names made of several words ("XGROUP CREATE") are sent as one token per word.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: &'static str,
    args: Vec<Bytes>,
}

impl Command {
    pub fn new(name: &'static str) -> Self {
        Self { name, args: vec![] }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /**
     * Argument tokens after the name
     */
    pub fn args(&self) -> &[Bytes] {
        &self.args
    }

    pub fn arg(mut self, arg: impl ToArg) -> Self {
        self.push(arg);
        self
    }

    pub fn push(&mut self, arg: impl ToArg) {
        self.args.push(arg.to_arg())
    }

    pub fn extend<T: ToArg>(&mut self, args: impl IntoIterator<Item = T>) {
        self.args.extend(args.into_iter().map(|arg| arg.to_arg()))
    }

    /**
     * Appends `flag` only when `enabled`
     */
    pub fn flag(&mut self, enabled: bool, flag: &'static str) {
        if enabled {
            self.push(flag)
        }
    }

    /**
     * Appends `keyword value` only when a value is present
     */
    pub fn option<T: ToArg>(&mut self, keyword: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.push(keyword);
            self.push(value);
        }
    }

    /**
     * Every token in wire order, name words first
     */
    pub fn tokens(&self) -> impl Iterator<Item = Bytes> + '_ {
        self.name
            .split(' ')
            .map(|word| Bytes::from_static(word.as_bytes()))
            .chain(self.args.iter().cloned())
    }

    /**
     * Request frame: `*<argc>` followed by one length prefixed bulk string per token
     */
    pub fn encode(&self) -> BytesMut {
        let tokens: Vec<Bytes> = self.tokens().collect();
        let payload: usize = tokens.iter().map(|token| token.len() + 16).sum();
        let mut buf = BytesMut::with_capacity(payload + 16);

        RESPToken::ArraySize(tokens.len()).write_to(&mut buf);
        for token in tokens {
            RESPToken::BulkString(token).write_to(&mut buf);
        }
        buf
    }
}

/**
 * Conversion of a typed parameter into one argument token
 */
pub trait ToArg {
    fn to_arg(&self) -> Bytes;
}

impl ToArg for str {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }
}

impl ToArg for [u8] {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}

impl ToArg for String {
    fn to_arg(&self) -> Bytes {
        self.as_str().to_arg()
    }
}

impl ToArg for Vec<u8> {
    fn to_arg(&self) -> Bytes {
        self.as_slice().to_arg()
    }
}

impl ToArg for Bytes {
    fn to_arg(&self) -> Bytes {
        self.clone()
    }
}

impl<T: ToArg + ?Sized> ToArg for &T {
    fn to_arg(&self) -> Bytes {
        (**self).to_arg()
    }
}

macro_rules! display_arg {
    ($($ty:ty),*) => {
        $(
            impl ToArg for $ty {
                fn to_arg(&self) -> Bytes {
                    Bytes::from(self.to_string())
                }
            }
        )*
    };
}

// f64 displays as the shortest string that parses back to the same value
display_arg!(i32, i64, u32, u64, usize, f64);

#[cfg(test)]
mod tests {
    use super::{Command, ToArg};
    use bytes::Bytes;
    use rstest::rstest;

    #[test]
    fn should_encode_length_prefixed_array() {
        let command = Command::new("SET").arg("key").arg("a b\r\nc");

        assert_eq!(
            &b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$7\r\na b\r\nc\r\n"[..],
            &command.encode()[..]
        )
    }

    #[test]
    fn should_split_subcommand_words_into_tokens() {
        let command = Command::new("XGROUP CREATE").arg("stream").arg("group").arg("$");

        assert_eq!(3, command.args().len());
        assert_eq!(
            &b"*5\r\n$6\r\nXGROUP\r\n$6\r\nCREATE\r\n$6\r\nstream\r\n$5\r\ngroup\r\n$1\r\n$\r\n"[..],
            &command.encode()[..]
        )
    }

    #[test]
    fn should_only_append_supplied_modifiers() {
        let mut command = Command::new("XRANGE").arg("s").arg("-").arg("+");
        command.option::<u64>("COUNT", None);
        command.flag(false, "JUSTID");
        assert_eq!(3, command.args().len());

        command.option("COUNT", Some(10u64));
        command.flag(true, "JUSTID");
        assert_eq!(
            vec![
                Bytes::from("s"), Bytes::from("-"), Bytes::from("+"),
                Bytes::from("COUNT"), Bytes::from("10"), Bytes::from("JUSTID"),
            ],
            command.args().to_vec()
        );
    }

    #[rstest]
    #[case(3.0, "3")]
    #[case(-2.5, "-2.5")]
    #[case(0.1, "0.1")]
    #[case(f64::INFINITY, "inf")]
    #[case(f64::NEG_INFINITY, "-inf")]
    fn should_format_floats_losslessly(#[case] value: f64, #[case] expected: &str) {
        let token = value.to_arg();
        assert_eq!(expected.as_bytes(), &token[..]);
        assert_eq!(value, std::str::from_utf8(&token).unwrap().parse::<f64>().unwrap());
    }

    #[test]
    fn should_accept_binary_and_borrowed_arguments() {
        let owned = String::from("owned");
        let command = Command::new("MSET")
            .arg(&owned)
            .arg(&b"\x00\xff"[..])
            .arg(vec![1u8, 2])
            .arg(Bytes::from_static(b"b"))
            .arg(-7i64);

        assert_eq!(
            vec![
                Bytes::from("owned"),
                Bytes::from_static(b"\x00\xff"),
                Bytes::from_static(&[1, 2]),
                Bytes::from("b"),
                Bytes::from("-7"),
            ],
            command.args().to_vec()
        );
    }
}
