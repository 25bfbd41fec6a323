/// Half-open interval overlap test: `[s1, e1)` and `[s2, e2)` share at least
/// one position. Touching endpoints do not overlap.
pub fn intervals_overlap(s1: i64, e1: i64, s2: i64, e2: i64) -> bool {
    s1.max(s2) < e1.min(e2)
}

#[derive(Debug, PartialEq, Clone)]
pub struct GenomicInterval {
    pub contig: String,
    pub start: i64,
    pub end: i64,
}

impl GenomicInterval {
    pub fn new(contig: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            contig: contig.into(),
            start,
            end,
        }
    }

    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        intervals_overlap(self.start, self.end, start, end)
    }
}

impl std::fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.start, self.end)
    }
}
