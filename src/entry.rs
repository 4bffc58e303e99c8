use crate::errors::EntryError;

/// Maximum number of characters kept for an account code.
pub const ACCOUNT_LEN: usize = 3;

/// Maximum number of characters kept for a date. Dates are compared as
/// strings, so they must be written in a format where lexicographic order is
/// chronological order (e.g. `YYYYMMDD`).
pub const DATE_LEN: usize = 8;

/// Maximum number of characters kept for a description.
pub const DESCRIPTION_LEN: usize = 79;

/// A single dated movement on an account.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    account: String,
    date: String,
    description: String,
    amount: f32,
}

impl Entry {
    /// Builds an entry, truncating each text field to its maximum length.
    ///
    /// An empty account or date is rejected: an empty account is what the
    /// reports use to mean "no group yet".
    pub fn new(
        account: &str,
        date: &str,
        description: &str,
        amount: f32,
    ) -> Result<Self, EntryError> {
        if account.is_empty() {
            return Err(EntryError::MissingField("account"));
        }
        if date.is_empty() {
            return Err(EntryError::MissingField("date"));
        }

        Ok(Self {
            account: bounded(account, ACCOUNT_LEN).to_string(),
            date: bounded(date, DATE_LEN).to_string(),
            description: bounded(description, DESCRIPTION_LEN).to_string(),
            amount,
        })
    }

    /// Parses one line of a ledger file.
    ///
    /// The expected shape is `<date> <account> <amount> <description>`. The
    /// date and account are read as width-limited tokens: a date written
    /// with more than 8 characters spills its remaining characters into the
    /// account token, which then usually makes the amount unreadable and the
    /// line is rejected.
    pub fn parse(line: &str) -> Result<Self, EntryError> {
        if line.is_empty() {
            return Err(EntryError::Empty);
        }
        if line.starts_with('#') {
            return Err(EntryError::Comment);
        }

        let mut scanner = Scanner::new(line);
        let date = scanner
            .token(DATE_LEN)
            .ok_or(EntryError::MissingField("date"))?;
        let account = scanner
            .token(ACCOUNT_LEN)
            .ok_or(EntryError::MissingField("account"))?;
        let amount = scanner.amount()?;
        let description = scanner.remainder().trim_end_matches(is_space);

        Self::new(account, date, description, amount)
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// The composite ordering key of the entry store.
    pub fn key(&self) -> (&str, &str) {
        (&self.account, &self.date)
    }

    /// Flips the sign of the amount.
    pub fn invert(&mut self) {
        self.amount = -self.amount;
    }
}

/// Returns at most `max` leading characters of `value`.
pub(crate) fn bounded(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Reads whitespace separated fields from the front of a line.
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn skip_space(&mut self) {
        self.rest = self.rest.trim_start_matches(is_space);
    }

    /// Reads up to `width` non-whitespace characters.
    fn token(&mut self, width: usize) -> Option<&'a str> {
        self.skip_space();

        let end = self
            .rest
            .char_indices()
            .take(width)
            .take_while(|(_, c)| !is_space(*c))
            .last()
            .map(|(i, c)| i + c.len_utf8())?;

        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(token)
    }

    /// Reads the longest prefix that forms a decimal number.
    fn amount(&mut self) -> Result<f32, EntryError> {
        self.skip_space();

        let len = number_len(self.rest);
        if len == 0 {
            return match self.rest.split(is_space).next() {
                Some(token) if !token.is_empty() => {
                    Err(EntryError::InvalidAmount(token.to_string()))
                }
                _ => Err(EntryError::MissingField("amount")),
            };
        }

        let (number, rest) = self.rest.split_at(len);
        let amount = number
            .parse::<f32>()
            .map_err(|_| EntryError::InvalidAmount(number.to_string()))?;
        self.rest = rest;
        Ok(amount)
    }

    fn remainder(mut self) -> &'a str {
        self.skip_space();
        self.rest
    }
}

/// Length of the decimal number at the start of `s`: an optional sign,
/// digits with an optional fraction (at least one digit overall) and an
/// optional exponent. Zero when there is no number.
fn number_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).map_or(false, u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_end = digits_from(i);
    let mut digits = int_end - i;
    i = int_end;

    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        digits += frac_end - (i + 1);
        i = frac_end;
    }

    if digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }

    i
}
