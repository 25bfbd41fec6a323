use super::{MotifHit, MotifIndex, Peak};
use rayon::prelude::*;

/// Derived motif fields of one peak. The optional fields are `None` when no
/// motif overlaps the peak.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotifSummary {
    pub found: bool,
    pub score: Option<f64>,
    pub count: usize,
    pub strand: Option<String>,
    pub total_score: Option<f64>,
}

impl MotifSummary {
    /// Summarizes a set of overlapping hits. The best hit is the first one, in
    /// input order, carrying the maximum score.
    pub fn from_overlaps<'a>(hits: impl IntoIterator<Item = &'a MotifHit>) -> Self {
        let mut best: Option<&MotifHit> = None;
        let mut count = 0;
        let mut total = 0.0;
        for hit in hits {
            count += 1;
            total += hit.score;
            match best {
                Some(b) if hit.score <= b.score => {}
                _ => best = Some(hit),
            }
        }

        match best {
            Some(best) => MotifSummary {
                found: true,
                score: Some(best.score),
                count,
                strand: Some(best.strand.clone()),
                total_score: Some(total),
            },
            None => MotifSummary::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedPeak<'a> {
    pub peak: &'a Peak,
    pub summary: MotifSummary,
}

/// Scans the hits of the peak's own chromosome for half-open overlaps.
pub fn summarize_peak(peak: &Peak, index: &MotifIndex) -> MotifSummary {
    let overlaps = index
        .hits(&peak.region.contig)
        .iter()
        .filter(|hit| peak.region.overlaps(hit.start, hit.stop));
    MotifSummary::from_overlaps(overlaps)
}

/// Annotates every peak, one record per peak in input order. Runs on the
/// current rayon pool.
pub fn annotate<'a>(peaks: &'a [Peak], index: &MotifIndex) -> Vec<AnnotatedPeak<'a>> {
    peaks
        .par_iter()
        .map(|peak| AnnotatedPeak {
            peak,
            summary: summarize_peak(peak, index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::GenomicInterval;

    fn peak(chrom: &str, start: i64, end: i64) -> Peak {
        Peak {
            region: GenomicInterval::new(chrom, start, end),
            fields: vec!["1".to_string()],
        }
    }

    fn hit(start: i64, stop: i64, strand: &str, score: f64) -> MotifHit {
        MotifHit {
            start,
            stop,
            strand: strand.to_string(),
            score,
        }
    }

    fn example_index() -> MotifIndex {
        let mut index = MotifIndex::new();
        index.insert("chr1", hit(150, 160, "+", 8.2));
        index.insert("chr1", hit(190, 210, "-", 9.5));
        index
    }

    #[test]
    fn test_two_overlapping_motifs() {
        let summary = summarize_peak(&peak("chr1", 100, 200), &example_index());
        assert!(summary.found);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.score, Some(9.5));
        assert_eq!(summary.strand.as_deref(), Some("-"));
        assert!((summary.total_score.unwrap() - 17.7).abs() < 1e-9);
    }

    #[test]
    fn test_chrom_without_motifs_gets_defaults() {
        let summary = summarize_peak(&peak("chr2", 100, 200), &example_index());
        assert_eq!(summary, MotifSummary::default());
        assert!(!summary.found);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.score, None);
        assert_eq!(summary.strand, None);
        assert_eq!(summary.total_score, None);
    }

    #[test]
    fn test_touching_motif_does_not_overlap() {
        let mut index = MotifIndex::new();
        index.insert("chr1", hit(200, 300, "+", 5.0));
        index.insert("chr1", hit(50, 100, "+", 5.0));
        let summary = summarize_peak(&peak("chr1", 100, 200), &index);
        assert!(!summary.found);
    }

    #[test]
    fn test_containment_overlaps_both_ways() {
        let mut index = MotifIndex::new();
        index.insert("chr1", hit(0, 1000, "+", 1.0));
        assert_eq!(summarize_peak(&peak("chr1", 100, 200), &index).count, 1);

        let mut index = MotifIndex::new();
        index.insert("chr1", hit(120, 130, "-", 2.0));
        assert_eq!(summarize_peak(&peak("chr1", 100, 200), &index).count, 1);
    }

    #[test]
    fn test_tie_break_keeps_first_hit() {
        let hits = [hit(1, 5, "+", 7.0), hit(2, 6, "-", 7.0), hit(3, 4, "+", 1.0)];
        let summary = MotifSummary::from_overlaps(hits.iter());
        assert_eq!(summary.score, Some(7.0));
        assert_eq!(summary.strand.as_deref(), Some("+"));
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_score, Some(15.0));
    }

    #[test]
    fn test_negative_scores_pick_maximum() {
        let hits = [hit(1, 5, "+", -3.0), hit(2, 6, "-", -1.5)];
        let summary = MotifSummary::from_overlaps(hits.iter());
        assert_eq!(summary.score, Some(-1.5));
        assert_eq!(summary.strand.as_deref(), Some("-"));
        assert_eq!(summary.total_score, Some(-4.5));
    }

    #[test]
    fn test_annotate_preserves_order_and_count() {
        let peaks = vec![
            peak("chr2", 0, 10),
            peak("chr1", 100, 200),
            peak("chr1", 100, 200),
            peak("chr1", 500, 600),
        ];
        let annotated = annotate(&peaks, &example_index());
        assert_eq!(annotated.len(), peaks.len());
        for (record, input) in annotated.iter().zip(&peaks) {
            assert!(std::ptr::eq(record.peak, input));
        }
        let counts: Vec<usize> = annotated.iter().map(|a| a.summary.count).collect();
        assert_eq!(counts, vec![0, 2, 2, 0]);
    }

    #[test]
    fn test_annotate_with_empty_index() {
        let peaks = vec![peak("chr1", 100, 200), peak("chr2", 1, 2)];
        let annotated = annotate(&peaks, &MotifIndex::default());
        assert_eq!(annotated.len(), 2);
        assert!(annotated
            .iter()
            .all(|a| a.summary == MotifSummary::default()));
    }
}
