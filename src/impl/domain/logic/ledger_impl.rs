use std::sync::Arc;

use fractic_server_error::ServerError;

use crate::{
    entities::{Bucket, BucketId, BucketSource, FormSchema, Ledger},
    errors::{BucketNotFound, CalculatedFieldViolation, SourceIndexOutOfRange},
};

impl Ledger {
    /// All lines of the schema at zero, with no sources.
    pub(crate) fn new(schema: Arc<FormSchema>) -> Self {
        let buckets = schema
            .lines
            .iter()
            .map(|line| Bucket {
                id: line.id.clone(),
                name: line.name.clone(),
                section: line.section.clone(),
                value: 0.0,
                sources: Vec::new(),
                calculated: schema.is_calculated(&line.id),
            })
            .collect();
        Self { schema, buckets }
    }

    /// Rebuild a ledger from previously saved buckets. Lines missing from
    /// `saved` keep their defaults, unknown lines are dropped, and name,
    /// section and classification always come from the schema.
    pub(crate) fn restore(schema: Arc<FormSchema>, saved: Vec<Bucket>) -> Self {
        let mut ledger = Self::new(schema);
        for saved_bucket in saved {
            let Some(position) = ledger.schema.position(&saved_bucket.id) else {
                tracing::debug!(bucket_id = %saved_bucket.id, "ignoring unknown line in saved ledger");
                continue;
            };
            let bucket = &mut ledger.buckets[position];
            bucket.sources = saved_bucket.sources;
            if bucket.calculated {
                bucket.value = saved_bucket.value;
            } else {
                bucket.value = bucket.sources_total();
                if bucket.value != saved_bucket.value {
                    tracing::warn!(
                        bucket_id = %bucket.id,
                        saved = saved_bucket.value,
                        sources_total = bucket.value,
                        "saved value disagrees with its sources, using sources total"
                    );
                }
            }
        }
        ledger
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn get(&self, id: &BucketId) -> Result<&Bucket, ServerError> {
        self.schema
            .position(id)
            .map(|i| &self.buckets[i])
            .ok_or_else(|| BucketNotFound::new(id.as_str()))
    }

    pub fn is_calculated(&self, id: &BucketId) -> bool {
        self.schema.is_calculated(id)
    }

    fn get_mut(&mut self, id: &BucketId) -> Result<&mut Bucket, ServerError> {
        match self.schema.position(id) {
            Some(i) => Ok(&mut self.buckets[i]),
            None => Err(BucketNotFound::new(id.as_str())),
        }
    }

    /// Add `source.value` to a manual bucket, recording the source.
    pub(crate) fn set_manual_value(
        &mut self,
        id: &BucketId,
        source: BucketSource,
    ) -> Result<(), ServerError> {
        let bucket = self.get_mut(id)?;
        if bucket.calculated {
            return Err(CalculatedFieldViolation::new(id.as_str()));
        }
        bucket.sources.push(source);
        bucket.value = bucket.sources_total();
        Ok(())
    }

    /// Remove the source at `index`. The resulting total may be negative.
    pub(crate) fn remove_source(
        &mut self,
        id: &BucketId,
        index: usize,
    ) -> Result<BucketSource, ServerError> {
        let bucket = self.get_mut(id)?;
        if index >= bucket.sources.len() {
            return Err(SourceIndexOutOfRange::new(
                id.as_str(),
                index,
                bucket.sources.len(),
            ));
        }
        let removed = bucket.sources.remove(index);
        if !bucket.calculated {
            bucket.value = bucket.sources_total();
        }
        Ok(removed)
    }

    /// Overwrite the value of a calculated bucket. Manual and unknown lines
    /// are left untouched.
    pub(crate) fn set_calculated_value(&mut self, id: &BucketId, value: f64) -> bool {
        match self.get_mut(id) {
            Ok(bucket) if bucket.calculated => {
                bucket.value = value;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        domain::logic::utils::test_support::small_schema,
        entities::{document_id, line, Chip},
    };

    #[test]
    fn starts_at_zero_with_schema_classification() {
        let ledger = Ledger::new(small_schema());
        assert_eq!(ledger.buckets().len(), 6);
        assert!(ledger.buckets().iter().all(|b| b.value() == 0.0));
        assert!(ledger.get(&line("31")).unwrap().is_calculated());
        assert!(!ledger.get(&line("29")).unwrap().is_calculated());
    }

    #[test]
    fn get_unknown_line_fails() {
        let ledger = Ledger::new(small_schema());
        assert!(ledger.get(&line("999")).is_err());
    }

    #[test]
    fn manual_value_tracks_sources() {
        let mut ledger = Ledger::new(small_schema());
        ledger
            .set_manual_value(&line("29"), BucketSource::manual(5_000_000.0))
            .unwrap();
        ledger
            .set_manual_value(
                &line("29"),
                BucketSource::from_chip("extracto.pdf", document_id("d1"), Chip::new("c1", 250.5)),
            )
            .unwrap();

        let bucket = ledger.get(&line("29")).unwrap();
        assert_eq!(bucket.value(), 5_000_250.5);
        assert_eq!(bucket.sources().len(), 2);
        assert_eq!(bucket.sources()[1].chip_id.as_deref(), Some("c1"));
    }

    #[test]
    fn manual_value_on_calculated_line_is_rejected() {
        let mut ledger = Ledger::new(small_schema());
        let result = ledger.set_manual_value(&line("31"), BucketSource::manual(1.0));
        assert!(result.is_err());
        let bucket = ledger.get(&line("31")).unwrap();
        assert_eq!(bucket.value(), 0.0);
        assert!(bucket.sources().is_empty());
    }

    #[test]
    fn remove_source_recomputes_and_allows_negative_totals() {
        let mut ledger = Ledger::new(small_schema());
        ledger
            .set_manual_value(&line("30"), BucketSource::manual(100.0))
            .unwrap();
        ledger
            .set_manual_value(&line("30"), BucketSource::manual(-400.0))
            .unwrap();

        let removed = ledger.remove_source(&line("30"), 0).unwrap();
        assert_eq!(removed.value, 100.0);
        assert_eq!(ledger.get(&line("30")).unwrap().value(), -400.0);
    }

    #[test]
    fn remove_source_out_of_range_fails() {
        let mut ledger = Ledger::new(small_schema());
        ledger
            .set_manual_value(&line("32"), BucketSource::manual(1.0))
            .unwrap();
        assert!(ledger.remove_source(&line("32"), 1).is_err());
        assert_eq!(ledger.get(&line("32")).unwrap().sources().len(), 1);
    }

    #[test]
    fn restore_fills_missing_and_ignores_unknown_lines() {
        let schema = small_schema();
        let mut saved = Ledger::new(schema.clone());
        saved
            .set_manual_value(&line("32"), BucketSource::manual(700.0))
            .unwrap();
        let mut buckets: Vec<Bucket> = saved
            .buckets()
            .iter()
            .filter(|b| b.id().as_str() != "29")
            .cloned()
            .collect();
        buckets.push(Bucket {
            id: line("500"),
            name: "Obsoleto".to_string(),
            section: "Otro".to_string(),
            value: 9.0,
            sources: Vec::new(),
            calculated: false,
        });

        let restored = Ledger::restore(schema, buckets);
        assert_eq!(restored.buckets().len(), 6);
        assert_eq!(restored.get(&line("29")).unwrap().value(), 0.0);
        assert_eq!(restored.get(&line("32")).unwrap().value(), 700.0);
        assert!(restored.get(&line("500")).is_err());
    }

    #[test]
    fn restore_keeps_manual_values_consistent_with_sources() {
        let schema = small_schema();
        let stale = Bucket {
            id: line("29"),
            name: "Total patrimonio bruto".to_string(),
            section: "Patrimonio".to_string(),
            value: 999.0,
            sources: vec![BucketSource::manual(10.0), BucketSource::manual(5.0)],
            calculated: false,
        };
        let restored = Ledger::restore(schema, vec![stale]);
        assert_eq!(restored.get(&line("29")).unwrap().value(), 15.0);
    }

    #[test]
    fn set_calculated_value_ignores_manual_lines() {
        let mut ledger = Ledger::new(small_schema());
        assert!(ledger.set_calculated_value(&line("31"), 10.0));
        assert!(!ledger.set_calculated_value(&line("29"), 10.0));
        assert_eq!(ledger.get(&line("31")).unwrap().value(), 10.0);
        assert_eq!(ledger.get(&line("29")).unwrap().value(), 0.0);
    }
}
