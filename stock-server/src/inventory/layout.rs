//! Variant layout resolution
//!
//! Turns what is stored for a product (variant rows, the legacy `variants`
//! JSON snapshot, the aggregate and the color/size definition) into one
//! resolved quantity per color/size. Pure, no I/O.
//!
//! Resolution order for a combination:
//! 1. an active `product_variant` row;
//! 2. for products without any rows, an entry of a parseable snapshot;
//! 3. the [`FallbackPolicy`] for combinations that are defined but have no
//!    stored quantity.

use std::str::FromStr;

use shared::models::{ProductVariant, ResolvedVariant, StockSource, VariantMap};

use super::error::{StockError, StockResult};

/// What reads return for a defined color/size with no stored quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// `floor(max(0, aggregate - stored) / missing)` per missing combination.
    ///
    /// Legacy products were seeded with an aggregate only; this spreads it
    /// across the defined colors × sizes. The same numbers are written as
    /// rows when such a product is first mutated.
    #[default]
    EvenSplit,
    /// Missing combinations read as 0
    Zero,
}

impl FallbackPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EvenSplit => "even_split",
            Self::Zero => "zero",
        }
    }
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "even_split" | "even" => Ok(Self::EvenSplit),
            "zero" | "none" => Ok(Self::Zero),
            other => Err(format!("unknown stock fallback policy: {other}")),
        }
    }
}

/// Everything stored about a product's stock
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub product_id: i64,
    pub aggregate: i64,
    pub colors: &'a [String],
    pub sizes: &'a [String],
    pub rows: &'a [ProductVariant],
    pub snapshot: Option<&'a str>,
}

/// Parse a stored `variants` snapshot.
///
/// Blank and `null` mean "no snapshot"; anything else that is not a
/// color → size → integer map is [`StockError::DataCorruption`].
pub fn parse_snapshot(product_id: i64, raw: &str) -> StockResult<Option<VariantMap>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    serde_json::from_str::<VariantMap>(trimmed)
        .map(Some)
        .map_err(|e| StockError::DataCorruption {
            product_id,
            reason: e.to_string(),
        })
}

/// Resolved stock map of one product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantLayout {
    pub product_id: i64,
    /// Stored aggregate (`product.stock_quantity`)
    pub aggregate: i64,
    entries: Vec<ResolvedVariant>,
}

impl VariantLayout {
    pub fn resolve(input: LayoutInput<'_>, policy: FallbackPolicy) -> Self {
        let mut stored: Vec<ResolvedVariant> = Vec::new();

        if !input.rows.is_empty() {
            stored.extend(input.rows.iter().filter(|r| r.is_active).map(|r| ResolvedVariant {
                color: r.color.clone(),
                size: r.size.clone(),
                stock_quantity: r.stock_quantity.max(0),
                source: StockSource::Row,
            }));
        } else if let Some(raw) = input.snapshot {
            match parse_snapshot(input.product_id, raw) {
                Ok(Some(map)) => {
                    for (color, sizes) in map {
                        for (size, quantity) in sizes {
                            if quantity < 0 {
                                tracing::warn!(
                                    product_id = input.product_id,
                                    color = %color,
                                    size = %size,
                                    quantity,
                                    "Negative legacy variant quantity, reading as 0"
                                );
                            }
                            stored.push(ResolvedVariant {
                                color: color.clone(),
                                size,
                                stock_quantity: quantity.max(0),
                                source: StockSource::Legacy,
                            });
                        }
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        product_id = input.product_id,
                        error = %e,
                        "Variant snapshot unparsable, reconstructing from fallback"
                    );
                }
            }
        }

        let find_stored = |color: &str, size: &str| {
            stored
                .iter()
                .position(|v| v.color == color && v.size == size)
        };

        let defined: Vec<(&String, &String)> = input
            .colors
            .iter()
            .flat_map(|c| input.sizes.iter().map(move |s| (c, s)))
            .collect();
        let missing = defined
            .iter()
            .filter(|(c, s)| find_stored(c, s).is_none())
            .count();

        let stored_total = stored
            .iter()
            .fold(0i64, |acc, v| acc.saturating_add(v.stock_quantity));
        let share = match policy {
            FallbackPolicy::EvenSplit if missing > 0 => {
                input.aggregate.saturating_sub(stored_total).max(0) / missing as i64
            }
            _ => 0,
        };
        if missing > 0 {
            tracing::debug!(
                product_id = input.product_id,
                policy = policy.as_str(),
                missing,
                share,
                "Fallback applied to variants without stored quantity"
            );
        }

        let mut used = vec![false; stored.len()];
        let mut entries = Vec::with_capacity(defined.len() + stored.len());
        for (color, size) in &defined {
            match find_stored(color, size) {
                Some(idx) => {
                    used[idx] = true;
                    entries.push(stored[idx].clone());
                }
                None => entries.push(ResolvedVariant {
                    color: (*color).clone(),
                    size: (*size).clone(),
                    stock_quantity: share,
                    source: StockSource::Fallback,
                }),
            }
        }
        // Stored combinations outside the current definition stay visible
        for (idx, variant) in stored.iter().enumerate() {
            if !used[idx] {
                entries.push(variant.clone());
            }
        }

        Self {
            product_id: input.product_id,
            aggregate: input.aggregate,
            entries,
        }
    }

    /// No color/size structure at all: stock lives in the aggregate
    pub fn is_aggregate_only(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ResolvedVariant] {
        &self.entries
    }

    pub fn get(&self, color: &str, size: &str) -> Option<&ResolvedVariant> {
        self.entries
            .iter()
            .find(|v| v.color == color && v.size == size)
    }

    /// Available quantity for a sale line or read.
    ///
    /// Aggregate-only products ignore color/size.
    pub fn available(&self, color: &str, size: &str) -> StockResult<i64> {
        if self.is_aggregate_only() {
            return Ok(self.aggregate);
        }
        self.get(color, size)
            .map(|v| v.stock_quantity)
            .ok_or_else(|| StockError::UnknownVariant {
                product_id: self.product_id,
                color: color.to_string(),
                size: size.to_string(),
            })
    }

    /// Entries not yet backed by a row (legacy snapshot or fallback)
    pub fn unmaterialized(&self) -> impl Iterator<Item = &ResolvedVariant> {
        self.entries.iter().filter(|v| v.source != StockSource::Row)
    }

    /// Sum of resolved quantities (the aggregate once rows are authoritative)
    pub fn total(&self) -> StockResult<i64> {
        if self.is_aggregate_only() {
            return Ok(self.aggregate);
        }
        self.entries.iter().try_fold(0i64, |acc, v| {
            acc.checked_add(v.stock_quantity).ok_or_else(|| {
                StockError::invalid(format!(
                    "stock total overflow for product {}",
                    self.product_id
                ))
            })
        })
    }

    /// color → size → quantity map of the resolved entries
    pub fn snapshot(&self) -> VariantMap {
        let mut map = VariantMap::new();
        for v in &self.entries {
            map.entry(v.color.clone())
                .or_default()
                .insert(v.size.clone(), v.stock_quantity);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn row(color: &str, size: &str, quantity: i64) -> ProductVariant {
        ProductVariant {
            product_id: 1,
            color: color.into(),
            size: size.into(),
            stock_quantity: quantity,
            is_active: true,
            updated_at: 0,
        }
    }

    fn resolve(
        aggregate: i64,
        colors: &[&str],
        sizes: &[&str],
        rows: &[ProductVariant],
        snapshot: Option<&str>,
    ) -> VariantLayout {
        let colors = strings(colors);
        let sizes = strings(sizes);
        VariantLayout::resolve(
            LayoutInput {
                product_id: 1,
                aggregate,
                colors: &colors,
                sizes: &sizes,
                rows,
                snapshot,
            },
            FallbackPolicy::EvenSplit,
        )
    }

    #[test]
    fn unseeded_product_splits_aggregate_evenly() {
        let layout = resolve(20, &["Black", "White"], &["8", "9"], &[], None);

        assert_eq!(layout.available("Black", "8").unwrap(), 5);
        assert_eq!(layout.available("White", "9").unwrap(), 5);
        assert!(layout
            .entries()
            .iter()
            .all(|v| v.source == StockSource::Fallback));
        assert_eq!(layout.total().unwrap(), 20);
    }

    #[test]
    fn legacy_snapshot_is_read_as_stored() {
        let layout = resolve(8, &["Black"], &["9", "10"], &[], Some(r#"{"Black":{"9":5,"10":3}}"#));

        let black_9 = layout.get("Black", "9").unwrap();
        assert_eq!(black_9.stock_quantity, 5);
        assert_eq!(black_9.source, StockSource::Legacy);
        assert_eq!(layout.available("Black", "10").unwrap(), 3);
        assert_eq!(layout.total().unwrap(), 8);
    }

    #[test]
    fn partial_snapshot_spreads_only_the_unallocated_rest() {
        let layout = resolve(
            20,
            &["Black", "White"],
            &["8", "9"],
            &[],
            Some(r#"{"Black":{"8":6}}"#),
        );

        assert_eq!(layout.available("Black", "8").unwrap(), 6);
        // (20 - 6) / 3 = 4, remainder 2 is not handed out
        assert_eq!(layout.available("Black", "9").unwrap(), 4);
        assert_eq!(layout.available("White", "8").unwrap(), 4);
        assert_eq!(layout.total().unwrap(), 18);
    }

    #[test]
    fn fallback_never_exceeds_the_aggregate() {
        let layout = resolve(3, &["Black", "White"], &["8", "9"], &[], None);
        assert!(layout.entries().iter().all(|v| v.stock_quantity == 0));

        let over = resolve(2, &["Black"], &["8", "9"], &[], Some(r#"{"Black":{"8":5}}"#));
        assert_eq!(over.available("Black", "9").unwrap(), 0);
    }

    #[test]
    fn corrupt_snapshot_falls_back_instead_of_failing() {
        let layout = resolve(8, &["Black"], &["9", "10"], &[], Some("{\"Black\": [oops"));

        assert_eq!(layout.available("Black", "9").unwrap(), 4);
        assert_eq!(layout.available("Black", "10").unwrap(), 4);
        assert_eq!(layout.unmaterialized().count(), 2);
    }

    #[test]
    fn rows_win_over_snapshot() {
        let rows = vec![row("Black", "9", 2), row("Black", "10", 1)];
        let layout = resolve(3, &["Black"], &["9", "10"], &rows, Some(r#"{"Black":{"9":50}}"#));

        assert_eq!(layout.available("Black", "9").unwrap(), 2);
        assert_eq!(layout.unmaterialized().count(), 0);
    }

    #[test]
    fn inactive_rows_are_not_resolved() {
        let mut retired = row("Red", "9", 4);
        retired.is_active = false;
        let rows = vec![row("Black", "9", 2), retired];
        let layout = resolve(2, &["Black"], &["9"], &rows, None);

        assert!(layout.get("Red", "9").is_none());
        assert_eq!(layout.total().unwrap(), 2);
    }

    #[test]
    fn overflowing_rows_fail_the_total() {
        let rows = vec![row("Black", "9", i64::MAX), row("Black", "10", 1)];
        let layout = resolve(0, &["Black"], &["9", "10"], &rows, None);

        assert_eq!(layout.available("Black", "9").unwrap(), i64::MAX);
        assert!(matches!(layout.total(), Err(StockError::Invalid(_))));
    }

    #[test]
    fn product_without_structure_sells_from_aggregate() {
        let layout = resolve(12, &[], &[], &[], None);

        assert!(layout.is_aggregate_only());
        assert_eq!(layout.available("", "").unwrap(), 12);
        assert_eq!(layout.available("Black", "9").unwrap(), 12);
        assert!(layout.snapshot().is_empty());
    }

    #[test]
    fn unknown_combination_is_rejected() {
        let layout = resolve(20, &["Black"], &["9"], &[], None);

        let err = layout.available("Green", "9").unwrap_err();
        assert!(matches!(err, StockError::UnknownVariant { .. }));
    }

    #[test]
    fn zero_policy_leaves_missing_combinations_empty() {
        let colors = strings(&["Black"]);
        let sizes = strings(&["8", "9"]);
        let layout = VariantLayout::resolve(
            LayoutInput {
                product_id: 1,
                aggregate: 20,
                colors: &colors,
                sizes: &sizes,
                rows: &[],
                snapshot: None,
            },
            FallbackPolicy::Zero,
        );
        assert_eq!(layout.available("Black", "8").unwrap(), 0);
    }

    #[test]
    fn snapshot_parsing() {
        assert!(parse_snapshot(1, "").unwrap().is_none());
        assert!(parse_snapshot(1, "null").unwrap().is_none());
        assert!(parse_snapshot(1, "{}").unwrap().unwrap().is_empty());
        assert!(matches!(
            parse_snapshot(1, r#"{"Black":{"9":"five"}}"#),
            Err(StockError::DataCorruption { product_id: 1, .. })
        ));
        assert_eq!("even_split".parse::<FallbackPolicy>(), Ok(FallbackPolicy::EvenSplit));
        assert!("random".parse::<FallbackPolicy>().is_err());
    }
}
