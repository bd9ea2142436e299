//! Provides the `LineSet` structure, the index built from each input file.
use fxhash::FxBuildHasher;
use indexmap::IndexSet;

/// Capacity hint used when no better estimate is available
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Largest number of lines reserved up front, whatever the hint asks for.
/// A set that outgrows it still grows on demand.
pub const MAX_CAPACITY_HINT: usize = 1 << 20;

/// A `LineSet` is the set of distinct lines seen in one input.
/// * Membership is a hash lookup, `O(1)`.
/// * Iteration follows first-seen order until `sort` is called, and
///   byte-lexicographic order after that.
/// * Each line is stored once: the `IndexSet`'s hash table and its entry vector
///   are two views of the same elements, so they can't disagree.
///
/// Lines are raw bytes. Nothing is trimmed, case-folded or transcoded.
#[derive(Debug, Clone)]
pub struct LineSet {
    lines: OrderedSet,
}
type OrderedSet = IndexSet<Vec<u8>, FxBuildHasher>;

impl Default for LineSet {
    fn default() -> Self {
        LineSet::new()
    }
}

impl LineSet {
    /// An empty `LineSet` sized for `DEFAULT_CAPACITY` lines
    #[must_use]
    pub fn new() -> Self {
        LineSet::with_capacity(DEFAULT_CAPACITY)
    }

    /// An empty `LineSet` with room for `capacity` lines before it reallocates.
    /// `capacity` is only a hint, and is capped at `MAX_CAPACITY_HINT`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_CAPACITY_HINT);
        LineSet { lines: OrderedSet::with_capacity_and_hasher(capacity, FxBuildHasher::default()) }
    }

    /// Adds `line` unless it's already present. Returns `true` if `line` was
    /// new. A line that's already present costs a lookup, not an allocation.
    pub fn add(&mut self, line: &[u8]) -> bool {
        if self.lines.contains(line) {
            return false;
        }
        self.lines.insert(line.to_vec())
    }

    /// Is `line` in the set?
    #[must_use]
    pub fn contains(&self, line: &[u8]) -> bool {
        self.lines.contains(line)
    }

    /// Puts the lines in byte-lexicographic order. Membership is untouched,
    /// and sorting an already sorted set changes nothing.
    pub fn sort(&mut self) {
        self.lines.sort();
    }

    /// The number of distinct lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if no line has been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lines, in insertion order or (after `sort`) sorted order
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.lines.iter().map(Vec::as_slice)
    }
}
