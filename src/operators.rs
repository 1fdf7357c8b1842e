//! Operators layered over any [`RecordCursor`].
//!
//! None of these know where rows come from. They only use the cursor
//! contract, so a generated source and a stored table behave the same here.

use cursor_core::{
    CursorError, MetadataError, Record, RecordCursor, RecordCursorFactory, RecordMetadata, RowId,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::{debug, warn};

/// Error type for operator construction.
#[derive(Debug, thiserror::Error)]
pub enum OperatorError {
    /// The source cannot serve lookups by row id
    #[error("Data source does not support random access")]
    RandomAccessUnsupported,

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Invalid predicate '{expression}': {reason}")]
    InvalidPredicate { expression: String, reason: String },
}

/// Fail unless `factory` can position cursors by row id.
pub fn require_random_access(factory: &dyn RecordCursorFactory) -> Result<(), OperatorError> {
    if factory.supports_random_access() {
        Ok(())
    } else {
        Err(OperatorError::RandomAccessUnsupported)
    }
}

/// Cursor that only yields rows accepted by a predicate.
pub struct FilterCursor<P> {
    base: Box<dyn RecordCursor>,
    predicate: P,
}

impl<P> FilterCursor<P>
where
    P: FnMut(&dyn Record) -> bool + Send,
{
    pub fn new(base: Box<dyn RecordCursor>, predicate: P) -> Self {
        Self { base, predicate }
    }
}

impl<P> RecordCursor for FilterCursor<P>
where
    P: FnMut(&dyn Record) -> bool + Send,
{
    fn has_next(&mut self) -> bool {
        while self.base.has_next() {
            if (self.predicate)(self.base.record()) {
                return true;
            }
        }
        false
    }

    fn record(&self) -> &dyn Record {
        self.base.record()
    }

    fn new_record(&self) -> Box<dyn Record> {
        self.base.new_record()
    }

    fn record_at_into(&self, record: &mut dyn Record, row_id: RowId) -> Result<(), CursorError> {
        self.base.record_at_into(record, row_id)
    }

    fn position_at(&mut self, row_id: RowId) {
        self.base.position_at(row_id);
    }

    fn to_top(&mut self) {
        self.base.to_top();
    }

    fn close(&mut self) {
        self.base.close();
    }
}

/// Comparison used by [`Predicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    // Two-character operators first so `<=` is not read as `<`.
    const SYMBOLS: [(&'static str, CompareOp); 7] = [
        ("<=", CompareOp::Le),
        (">=", CompareOp::Ge),
        ("!=", CompareOp::Ne),
        ("<>", CompareOp::Ne),
        ("=", CompareOp::Eq),
        ("<", CompareOp::Lt),
        (">", CompareOp::Gt),
    ];

    fn apply(self, left: i64, right: i64) -> bool {
        match self {
            CompareOp::Eq => left == right,
            CompareOp::Ne => left != right,
            CompareOp::Lt => left < right,
            CompareOp::Le => left <= right,
            CompareOp::Gt => left > right,
            CompareOp::Ge => left >= right,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// `column <op> integer` comparison over long columns, e.g. `x > 3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    column: usize,
    column_name: String,
    op: CompareOp,
    operand: i64,
}

impl Predicate {
    /// Parse `expression`, resolving the column against `metadata`.
    pub fn parse(expression: &str, metadata: &RecordMetadata) -> Result<Self, OperatorError> {
        let invalid = |reason: &str| OperatorError::InvalidPredicate {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let start = expression
            .find(['<', '>', '=', '!'])
            .ok_or_else(|| invalid("missing comparison operator"))?;
        let column_name = expression[..start].trim();
        let rest = &expression[start..];

        let (symbol, op) = CompareOp::SYMBOLS
            .iter()
            .find(|(symbol, _)| rest.starts_with(symbol))
            .copied()
            .ok_or_else(|| invalid("unknown comparison operator"))?;

        let operand = rest[symbol.len()..]
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid("right-hand side must be an integer"))?;

        let column = metadata.require_column(column_name)?;

        Ok(Self {
            column,
            column_name: column_name.to_string(),
            op,
            operand,
        })
    }

    /// Whether `record` satisfies the comparison.
    pub fn matches(&self, record: &dyn Record) -> bool {
        self.op.apply(record.get_long(self.column), self.operand)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column_name, self.op.symbol(), self.operand)
    }
}

/// Cursor replaying a fixed list of row ids from a random-access source.
///
/// Rows are read into one handle obtained from the source, repositioned
/// for each id.
pub struct RowIdCursor {
    base: Box<dyn RecordCursor>,
    record: Box<dyn Record>,
    row_ids: Vec<RowId>,
    next: usize,
}

impl RowIdCursor {
    pub fn new(base: Box<dyn RecordCursor>, row_ids: Vec<RowId>) -> Self {
        let record = base.new_record();
        Self {
            base,
            record,
            row_ids,
            next: 0,
        }
    }

    /// Row ids this cursor replays, in order.
    pub fn row_ids(&self) -> &[RowId] {
        &self.row_ids
    }
}

impl RecordCursor for RowIdCursor {
    fn has_next(&mut self) -> bool {
        let Some(&row_id) = self.row_ids.get(self.next) else {
            return false;
        };
        match self.base.record_at_into(self.record.as_mut(), row_id) {
            Ok(()) => {
                self.next += 1;
                true
            }
            Err(e) => {
                warn!("Stopping row id replay at {}: {}", row_id, e);
                self.next = self.row_ids.len();
                false
            }
        }
    }

    fn record(&self) -> &dyn Record {
        self.record.as_ref()
    }

    fn new_record(&self) -> Box<dyn Record> {
        self.base.new_record()
    }

    fn record_at_into(&self, record: &mut dyn Record, row_id: RowId) -> Result<(), CursorError> {
        self.base.record_at_into(record, row_id)
    }

    fn position_at(&mut self, row_id: RowId) {
        if let Err(e) = self.base.record_at_into(self.record.as_mut(), row_id) {
            warn!("Failed to position at row {}: {}", row_id, e);
        }
    }

    fn to_top(&mut self) {
        self.next = 0;
    }

    fn size(&self) -> Option<u64> {
        u64::try_from(self.row_ids.len()).ok()
    }

    fn close(&mut self) {
        self.base.close();
    }
}

/// Picks a uniform random subset of rows.
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    /// Sampler seeded from `seed`, or from entropy when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Choose up to `k` distinct rows of `cursor`.
    ///
    /// One sequential pass collects candidate row ids with reservoir
    /// sampling, so memory stays proportional to `k`. The cursor is then
    /// rewound and the chosen rows are replayed in row id order through
    /// [`RowIdCursor`]. When the source has `k` rows or fewer, every row is
    /// returned.
    pub fn sample(&mut self, mut cursor: Box<dyn RecordCursor>, k: usize) -> RowIdCursor {
        let mut reservoir: Vec<RowId> = Vec::with_capacity(k);
        let mut seen: u64 = 0;

        while cursor.has_next() {
            let row_id = cursor.record().row_id();
            if reservoir.len() < k {
                reservoir.push(row_id);
            } else {
                let slot = self.rng.gen_range(0..=seen);
                if let Ok(slot) = usize::try_from(slot) {
                    if slot < k {
                        reservoir[slot] = row_id;
                    }
                }
            }
            seen += 1;
        }

        reservoir.sort();
        reservoir.dedup();
        cursor.to_top();

        debug!("Sampled {} of {} rows", reservoir.len(), seen);
        RowIdCursor::new(cursor, reservoir)
    }
}

/// Drain `cursor`, reading column `col` of every row as a long.
pub fn collect_longs(cursor: &mut dyn RecordCursor, col: usize) -> Vec<i64> {
    let mut values = Vec::new();
    while cursor.has_next() {
        values.push(cursor.record().get_long(col));
    }
    values
}
