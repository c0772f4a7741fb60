use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Trip – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single bike trip (one row of the source CSV).
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// When the trip started.
    pub start_time: NaiveDateTime,
    /// Station the trip started from.
    pub start_station: String,
    /// Station the trip ended at.
    pub end_station: String,
    /// Trip length in seconds.
    pub duration_secs: i64,
    /// Rider category, e.g. "Subscriber" or "Customer".
    pub user_type: String,
    /// Rider gender – only some source files carry the column.
    pub gender: Option<String>,
    /// Rider birth year – only some source files carry the column.
    pub birth_year: Option<i32>,
}

// ---------------------------------------------------------------------------
// TripTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset for one city.
///
/// The two schema flags record whether the source file carried the optional
/// demographic columns at all, as opposed to individual rows being empty.
/// Filtering never changes the flags, only which row indices a view selects.
#[derive(Debug, Clone)]
pub struct TripTable {
    /// All trips, in file order.
    pub trips: Vec<Trip>,
    /// Whether the source CSV had a Gender column.
    pub has_gender: bool,
    /// Whether the source CSV had a Birth Year column.
    pub has_birth_year: bool,
}

impl TripTable {
    /// Number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// A view over every row, in load order.
    pub fn view_all(&self) -> TripView<'_> {
        TripView {
            table: self,
            indices: (0..self.trips.len()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// TripView – a filtered, non-owning projection of a table
// ---------------------------------------------------------------------------

/// A borrowed selection of rows from a [`TripTable`].
///
/// Reporters and the raw-data pager only ever operate on views; the backing
/// table is never mutated after loading.
#[derive(Debug, Clone)]
pub struct TripView<'a> {
    /// The backing table.
    pub table: &'a TripTable,
    /// Indices of the selected rows, in load order.
    pub indices: Vec<usize>,
}

impl<'a> TripView<'a> {
    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the view selects no rows.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Selected trip at view position `i` (not a table index).
    pub fn get(&self, i: usize) -> Option<&'a Trip> {
        self.indices.get(i).map(|&idx| &self.table.trips[idx])
    }

    /// Iterate over the selected trips.
    pub fn iter(&self) -> impl Iterator<Item = &'a Trip> + '_ {
        self.indices.iter().map(move |&idx| &self.table.trips[idx])
    }
}
