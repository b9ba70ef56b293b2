use tracing::{debug, trace};

use crate::{
    matcher::{Matcher, MatcherError, MatcherSpec, OptionMatch},
    range::RelativeRange,
};

/**
The argument currently under examination, passed to the scan callback.

There is exactly one [`CurrentArgument`] per scan. It is reused for every
iteration: the scanner advances its cursor, reclassifies the token there, and
hands it back to the callback. Because the scanner re-reads the cursor after
every callback, the callback can redirect the scan by taking a separate value
([`value`][Self::value], [`advance`][Self::advance]), swallowing a range of
arguments ([`consume`][Self::consume]), or rewinding
([`reset`][Self::reset], [`restart`][Self::restart]).

Every inspection marks the argument as *used*. After the callback returns, an
argument that is still [unused][Self::is_unused] wasn't recognized by
anything, which callers usually turn into a usage error.
*/
#[derive(Debug)]
pub struct CurrentArgument<'arg> {
    args: Vec<&'arg str>,
    index: isize,
    options_enabled: bool,
    is_option: bool,
    is_param: bool,
    last_match: Option<OptionMatch<'arg>>,
    used: bool,
}

impl<'arg> CurrentArgument<'arg> {
    pub(crate) fn new(args: Vec<&'arg str>) -> Self {
        Self {
            args,
            index: -1,
            options_enabled: true,
            is_option: false,
            is_param: false,
            last_match: None,
            used: false,
        }
    }

    /// Move to the next argument that should be handed to the callback.
    /// Returns false once the arguments are exhausted.
    pub(crate) fn begin_next(&mut self) -> bool {
        loop {
            self.index = self.index.saturating_add(1);

            let Some(token) = self.get(self.index) else {
                trace!(index = self.index, "arguments exhausted");
                return false;
            };

            if self.options_enabled && token == "--" {
                debug!(index = self.index, "got `--`, disabling option parsing");
                self.options_enabled = false;
                continue;
            }

            self.is_option = self.options_enabled && token.starts_with('-');
            self.is_param = false;
            self.last_match = None;
            self.used = false;

            trace!(
                index = self.index,
                token,
                option = self.is_option,
                "visiting argument"
            );

            return true;
        }
    }

    /// The cursor position. This is `-1` right after a
    /// [`restart`][Self::restart].
    #[inline]
    #[must_use]
    pub fn index(&self) -> isize {
        self.index
    }

    /// The full list of arguments being scanned
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[&'arg str] {
        &self.args
    }

    /// The number of arguments being scanned
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// True if this is the last argument in the list
    #[inline]
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.get(self.index.saturating_add(1)).is_none()
    }

    /// Get the argument at an absolute index, without moving the cursor or
    /// marking anything used.
    #[must_use]
    pub fn get(&self, index: isize) -> Option<&'arg str> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.args.get(index))
            .copied()
    }

    /// The argument after this one, without moving the cursor or marking
    /// anything used.
    #[must_use]
    pub fn peek(&self) -> Option<&'arg str> {
        self.get(self.index.saturating_add(1))
    }

    /// False once a `--` has been seen. From that point on, no argument is
    /// treated as an option.
    #[inline]
    #[must_use]
    pub fn options_enabled(&self) -> bool {
        self.options_enabled
    }

    /// True if this argument was classified as an option (it starts with a
    /// `-`, and came before any `--`)
    #[inline]
    #[must_use]
    pub fn is_option(&self) -> bool {
        self.is_option
    }

    /// True if this argument is a positional literal rather than an option.
    /// This doesn't count as using the argument.
    #[inline]
    #[must_use]
    pub fn is_literal(&self) -> bool {
        !self.is_option
    }

    /// True if the most recent successful option match was against a spec
    /// that expects a value
    #[inline]
    #[must_use]
    pub fn is_param(&self) -> bool {
        self.is_param
    }

    /// The captures from the most recent successful option match on this
    /// argument
    #[inline]
    #[must_use]
    pub fn last_match(&self) -> Option<&OptionMatch<'arg>> {
        self.last_match.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_used(&self) -> bool {
        self.used
    }

    #[inline]
    #[must_use]
    pub fn is_unused(&self) -> bool {
        !self.used
    }

    #[inline]
    pub fn mark_used(&mut self) -> &mut Self {
        self.used = true;
        self
    }

    #[inline]
    pub fn mark_unused(&mut self) -> &mut Self {
        self.used = false;
        self
    }

    /// Call `body` if this argument is an option. The classification isn't
    /// affected, and the argument isn't marked used.
    pub fn option_with_query<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> Option<T> {
        match self.is_option {
            true => Some(body(self)),
            false => None,
        }
    }

    /**
    Match this argument against a prebuilt [`Matcher`]. Only options can
    match. On success the argument is marked used, and the match is available
    through [`last_match`][Self::last_match] and [`value`][Self::value].
    */
    pub fn matches(&mut self, matcher: &Matcher) -> bool {
        if !self.is_option {
            return false;
        }

        let Some(token) = self.get(self.index) else {
            return false;
        };

        match matcher.captures(token) {
            Some(found) => {
                self.is_param = found.is_value_bearing();
                self.last_match = Some(found);
                self.used = true;
                true
            }
            None => false,
        }
    }

    /// Like [`matches`][Self::matches], but calls `body` on a successful
    /// match and returns its result.
    pub fn matches_with<T>(
        &mut self,
        matcher: &Matcher,
        body: impl FnOnce(&mut Self) -> T,
    ) -> Option<T> {
        match self.matches(matcher) {
            true => Some(body(self)),
            false => None,
        }
    }

    /**
    Match this argument against a set of option specs, such as
    `["v", "verbose"]` or `["o=", "output="]`. See [`MatcherSpec`] for the
    spec conventions.

    With no specs at all this is the same as [`is_option`][Self::is_option]:
    nothing is matched and the argument isn't marked used.

    This builds a fresh [`Matcher`] on every call; use
    [`matches`][Self::matches] with a stored matcher in hot loops.
    */
    pub fn option<I>(&mut self, specs: I) -> Result<bool, MatcherError>
    where
        I: IntoIterator,
        I::Item: Into<MatcherSpec>,
    {
        let specs: Vec<MatcherSpec> = specs.into_iter().map(Into::into).collect();

        match specs.is_empty() {
            true => Ok(self.is_option),
            false => Matcher::new(specs).map(|matcher| self.matches(&matcher)),
        }
    }

    /// Like [`option`][Self::option], but calls `body` on a successful match
    /// and returns its result. With no specs, this is
    /// [`option_with_query`][Self::option_with_query].
    pub fn option_with<I, T>(
        &mut self,
        specs: I,
        body: impl FnOnce(&mut Self) -> T,
    ) -> Result<Option<T>, MatcherError>
    where
        I: IntoIterator,
        I::Item: Into<MatcherSpec>,
    {
        let specs: Vec<MatcherSpec> = specs.into_iter().map(Into::into).collect();

        match specs.is_empty() {
            true => Ok(self.option_with_query(body)),
            false => Matcher::new(specs).map(|matcher| self.matches_with(&matcher, body)),
        }
    }

    /// Compare the raw argument against exact strings and/or regexes,
    /// regardless of whether it's an option. Marks the argument used if any
    /// of them match.
    pub fn is<I>(&mut self, specs: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<MatcherSpec>,
    {
        let Some(token) = self.get(self.index) else {
            return false;
        };

        let found = specs
            .into_iter()
            .map(Into::into)
            .any(|spec| spec.is_match(token));

        if found {
            self.used = true;
        }

        found
    }

    /// Like [`is`][Self::is], but calls `body` on a match and returns its
    /// result.
    pub fn is_with<I, T>(&mut self, specs: I, body: impl FnOnce(&mut Self) -> T) -> Option<T>
    where
        I: IntoIterator,
        I::Item: Into<MatcherSpec>,
    {
        match self.is(specs) {
            true => Some(body(self)),
            false => None,
        }
    }

    /// Call `body` if this argument is a positional literal. Checking doesn't
    /// mark the argument used; reading it in `body` does.
    pub fn literal_with<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> Option<T> {
        match self.is_option {
            true => None,
            false => Some(body(self)),
        }
    }

    /**
    Get the value for this argument.

    If this is an option that just matched a value-bearing spec, the value is
    the inline part (`-ofile`, `--output=file`) if there was one; otherwise
    it's the next argument (`-o file`, `--output file`), and the cursor moves
    onto it. Returns [`None`] if the value should be the next argument but
    there isn't one.

    For anything else, the value is the raw argument itself.
    */
    pub fn value(&mut self) -> Option<&'arg str> {
        self.used = true;

        if !(self.is_option && self.is_param) {
            return self.raw();
        }

        match self.last_match.as_ref().and_then(OptionMatch::param) {
            Some(param) => Some(param),
            None => self.advance(),
        }
    }

    /// The raw text of this argument
    pub fn raw(&mut self) -> Option<&'arg str> {
        self.used = true;
        self.get(self.index)
    }

    /// Move the cursor forward by one and return the argument there.
    pub fn advance(&mut self) -> Option<&'arg str> {
        self.used = true;
        self.index = self.index.saturating_add(1);
        self.get(self.index)
    }

    /**
    Take a range of arguments relative to this one, and move the cursor to
    the end of that range. `consume(1..=2)` takes the next two arguments;
    `consume(1..=-1)` or `consume(1..)` takes all of the remaining ones. See
    [`RelativeRange`] for how negative ends work.

    The returned arguments are clamped to the argument list, so asking for
    more than remain returns what's there.
    */
    pub fn consume(&mut self, range: impl RelativeRange) -> Vec<&'arg str> {
        let (start, end) = range.resolve(self.index, self.args.len());
        debug!(index = self.index, start, end, "consuming arguments");

        self.used = true;
        self.index = end;

        let clamp = |index: isize| usize::try_from(index).unwrap_or(0).min(self.args.len());
        let start = clamp(start);
        let end = clamp(end.saturating_add(1));

        match start < end {
            true => self.args[start..end].to_vec(),
            false => Vec::new(),
        }
    }

    /**
    Move the cursor to `index`. The scan resumes at `index + 1` once the
    callback returns. Indexes below `-1` are treated as `-1`.
    */
    pub fn reset(&mut self, index: isize) -> &mut Self {
        debug!(from = self.index, to = index, "rewinding");
        self.index = index.max(-1);
        self
    }

    /// Rewind to before the first argument, so that the scan starts over from
    /// the top once the callback returns.
    pub fn restart(&mut self) -> &mut Self {
        self.reset(-1)
    }

    /// Move the cursor to the last argument, so that the scan ends once the
    /// callback returns.
    pub fn finish(&mut self) -> &mut Self {
        let last = isize::try_from(self.args.len()).unwrap_or(isize::MAX) - 1;
        self.reset(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at<'a>(args: &[&'a str], index: isize) -> CurrentArgument<'a> {
        let mut arg = CurrentArgument::new(args.to_vec());
        arg.reset(index - 1);
        assert!(arg.begin_next());
        arg
    }

    #[test]
    fn starts_before_the_first_argument() {
        let arg = CurrentArgument::new(vec!["a"]);
        assert_eq!(arg.index(), -1);
        assert!(arg.options_enabled());
    }

    #[test]
    fn double_dash_is_skipped_once() {
        let mut arg = CurrentArgument::new(vec!["--", "--", "-x"]);

        assert!(arg.begin_next());
        assert_eq!(arg.index(), 1);
        assert!(!arg.is_option());
        assert!(!arg.options_enabled());

        assert!(arg.begin_next());
        assert_eq!(arg.index(), 2);
        assert!(!arg.is_option());

        assert!(!arg.begin_next());
    }

    #[test]
    fn lone_dash_is_an_option() {
        let arg = at(&["-"], 0);
        assert!(arg.is_option());
    }

    #[test]
    fn literals_never_match_options() {
        let mut arg = at(&["x"], 0);
        assert!(!arg.option(["x"]).unwrap());
        assert!(arg.is_unused());
    }

    #[test]
    fn option_without_specs_is_a_query() {
        let mut arg = at(&["-x", "y"], 0);
        assert!(arg.option(Vec::<MatcherSpec>::new()).unwrap());
        assert_eq!(
            arg.option_with(Vec::<MatcherSpec>::new(), |arg| arg.index())
                .unwrap(),
            Some(0)
        );
        assert!(arg.is_unused());
        assert!(arg.last_match().is_none());

        let mut arg = at(&["-x", "y"], 1);
        assert!(!arg.option(Vec::<MatcherSpec>::new()).unwrap());
        assert_eq!(
            arg.option_with(Vec::<MatcherSpec>::new(), |arg| arg.index())
                .unwrap(),
            None
        );
        assert!(arg.is_unused());
    }

    #[test]
    fn rewinding_past_the_end_stops_the_scan() {
        let mut arg = at(&["a", "b"], 0);
        arg.reset(isize::MAX);
        assert!(arg.is_last());
        assert_eq!(arg.peek(), None);
        assert_eq!(arg.advance(), None);
        assert_eq!(arg.index(), isize::MAX);
        assert!(!arg.begin_next());
    }

    #[test]
    fn flag_match_is_not_a_param() {
        let mut arg = at(&["-v", "next"], 0);
        assert!(arg.option(["v", "output="]).unwrap());
        assert!(!arg.is_param());
        assert_eq!(arg.value(), Some("-v"));
        assert_eq!(arg.index(), 0);
    }

    #[test]
    fn value_past_the_end_is_none() {
        let mut arg = at(&["--output"], 0);
        assert!(arg.option(["output="]).unwrap());
        assert_eq!(arg.value(), None);
        assert_eq!(arg.index(), 1);
    }

    #[test]
    fn match_state_is_cleared_per_iteration() {
        let mut arg = CurrentArgument::new(vec!["-o", "-x", "y"]);
        assert!(arg.begin_next());
        assert!(arg.option(["o="]).unwrap());
        assert!(arg.is_param());

        assert!(arg.begin_next());
        assert!(!arg.is_param());
        assert!(arg.last_match().is_none());
        assert_eq!(arg.value(), Some("-x"));
    }

    #[test]
    fn consume_clamps_to_the_argument_list() {
        let mut arg = at(&["a", "b", "c"], 1);
        assert_eq!(arg.consume(1..=5), ["c"]);
        assert_eq!(arg.index(), 6);

        let mut arg = at(&["a", "b", "c"], 2);
        assert!(arg.consume(1..=2).is_empty());

        let mut arg = at(&["a", "b", "c"], 1);
        assert_eq!(arg.consume(1..=isize::MAX), ["c"]);
        assert_eq!(arg.index(), isize::MAX);
        assert!(!arg.begin_next());
    }

    #[test]
    fn peek_and_get_do_not_mark_used() {
        let arg = at(&["a", "b"], 0);
        assert_eq!(arg.peek(), Some("b"));
        assert_eq!(arg.get(0), Some("a"));
        assert_eq!(arg.get(-1), None);
        assert!(arg.is_unused());
    }

    #[test]
    fn reset_clamps_below_start() {
        let mut arg = at(&["a"], 0);
        assert_eq!(arg.reset(-10).index(), -1);
    }

    #[test]
    fn finish_moves_to_the_last_argument() {
        let mut arg = at(&["a", "b", "c"], 0);
        arg.finish();
        assert_eq!(arg.index(), 2);
        assert!(!arg.begin_next());
    }
}
