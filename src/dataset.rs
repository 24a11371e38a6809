/// Trendboard Dataset
///
/// The immutable, column-wise store of trending-video rows. A dataset is built
/// once (usually from a CSV file) and then only read: every filter produces a
/// separate `FilterView` of row indices, so the rows themselves are never
/// reordered, mutated or removed.

use crate::error::{DataError, DataResult};
use crate::interner::{InternerStats, StringId, StringInterner};
use crate::record::{RawVideoRecord, VideoRecord};
use crate::schema::{Facet, Measure, Schema};
use log::info;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A borrowed view of one dataset row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VideoRow<'a> {
    /// Position of the row in ingestion order
    pub index: usize,
    pub category_id: i64,
    pub publish_country: &'a str,
    pub published_day_of_week: &'a str,
    pub views: u64,
    pub likes: u64,
    pub comment_count: u64,
    pub title: &'a str,
    pub channel_title: &'a str,
}

impl VideoRow<'_> {
    pub fn measure(&self, measure: Measure) -> u64 {
        match measure {
            Measure::Views => self.views,
            Measure::Likes => self.likes,
            Measure::CommentCount => self.comment_count,
        }
    }
}

/// Column-wise trending-video rows with interned country and weekday labels.
///
/// # Examples
///
/// ```
/// use trendboard::Dataset;
///
/// let csv = "\
/// video_id,title,channel_title,category_id,views,likes,comment_count,publish_country,published_day_of_week
/// a1,First,Chan A,10,100,5,1,US,Monday
/// a2,Second,Chan B,24,250,9,3,CA,Tuesday
/// ";
/// let dataset = Dataset::from_reader("trending", csv.as_bytes()).unwrap();
///
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.categories(), vec![10, 24]);
/// assert_eq!(dataset.get_row(1).unwrap().title, "Second");
/// ```
pub struct Dataset {
    name: String,
    row_count: usize,
    category_id: Vec<i64>,
    publish_country: Vec<StringId>,
    published_day_of_week: Vec<StringId>,
    views: Vec<u64>,
    likes: Vec<u64>,
    comment_count: Vec<u64>,
    title: Vec<String>,
    channel_title: Vec<String>,
    countries: StringInterner,
    weekdays: StringInterner,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new(name: impl Into<String>) -> Self {
        Dataset {
            name: name.into(),
            row_count: 0,
            category_id: Vec::new(),
            publish_country: Vec::new(),
            published_day_of_week: Vec::new(),
            views: Vec::new(),
            likes: Vec::new(),
            comment_count: Vec::new(),
            title: Vec::new(),
            channel_title: Vec::new(),
            countries: StringInterner::new(),
            weekdays: StringInterner::new(),
        }
    }

    /// Build a dataset from already-validated records, keeping their order.
    pub fn from_records<I>(name: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = VideoRecord>,
    {
        let mut dataset = Dataset::new(name);
        for record in records {
            dataset.append(record);
        }
        dataset
    }

    /// Load a dataset from a CSV file. The dataset is named after the file stem.
    pub fn from_path(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());

        Self::from_reader(name, file)
    }

    /// Load a dataset from any CSV source with a header row.
    ///
    /// Every required column is checked before the first record is read, so a
    /// file with a missing column fails without partially loading.
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> DataResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let schema = Schema::new(headers.iter().map(|h| h.to_string()).collect());
        if let Some(missing) = schema.missing_required() {
            return Err(DataError::MissingColumn(missing.to_string()));
        }

        let mut dataset = Dataset::new(name);
        for result in csv_reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let raw: RawVideoRecord = record.deserialize(Some(&headers))?;
            dataset.append(raw.validate(line)?);
        }

        info!(
            "Loaded dataset '{}': {} rows, {} categories, {} countries, {} weekdays",
            dataset.name,
            dataset.len(),
            dataset.categories().len(),
            dataset.countries.len(),
            dataset.weekdays.len()
        );

        Ok(dataset)
    }

    fn append(&mut self, record: VideoRecord) {
        self.category_id.push(record.category_id);
        self.publish_country.push(self.countries.intern(&record.publish_country));
        self.published_day_of_week.push(self.weekdays.intern(&record.published_day_of_week));
        self.views.push(record.views);
        self.likes.push(record.likes);
        self.comment_count.push(record.comment_count);
        self.title.push(record.title);
        self.channel_title.push(record.channel_title);
        self.row_count += 1;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn get_row(&self, row: usize) -> Result<VideoRow<'_>, String> {
        if row >= self.row_count {
            return Err(format!("Row {} out of range [0, {})", row, self.row_count));
        }
        Ok(self.row_unchecked(row))
    }

    /// Callers guarantee `row < len()`.
    pub(crate) fn row_unchecked(&self, row: usize) -> VideoRow<'_> {
        VideoRow {
            index: row,
            category_id: self.category_id[row],
            publish_country: self.countries.resolve(self.publish_country[row]).unwrap_or_default(),
            published_day_of_week: self
                .weekdays
                .resolve(self.published_day_of_week[row])
                .unwrap_or_default(),
            views: self.views[row],
            likes: self.likes[row],
            comment_count: self.comment_count[row],
            title: &self.title[row],
            channel_title: &self.channel_title[row],
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = VideoRow<'_>> {
        (0..self.row_count).map(move |i| self.row_unchecked(i))
    }

    #[inline]
    pub(crate) fn category_at(&self, row: usize) -> i64 {
        self.category_id[row]
    }

    #[inline]
    pub(crate) fn country_id_at(&self, row: usize) -> StringId {
        self.publish_country[row]
    }

    #[inline]
    pub(crate) fn weekday_id_at(&self, row: usize) -> StringId {
        self.published_day_of_week[row]
    }

    #[inline]
    pub(crate) fn measure_at(&self, row: usize, measure: Measure) -> u64 {
        match measure {
            Measure::Views => self.views[row],
            Measure::Likes => self.likes[row],
            Measure::CommentCount => self.comment_count[row],
        }
    }

    /// The interner backing a string facet; `None` for the numeric category facet.
    pub(crate) fn facet_interner(&self, facet: Facet) -> Option<&StringInterner> {
        match facet {
            Facet::Category => None,
            Facet::Country => Some(&self.countries),
            Facet::Weekday => Some(&self.weekdays),
        }
    }

    /// Distinct category ids, ascending.
    pub fn categories(&self) -> Vec<i64> {
        let distinct: BTreeSet<i64> = self.category_id.iter().copied().collect();
        distinct.into_iter().collect()
    }

    /// Distinct country codes, ascending.
    pub fn countries(&self) -> Vec<&str> {
        sorted_strings(&self.countries)
    }

    /// Distinct weekday names, ascending.
    pub fn weekdays(&self) -> Vec<&str> {
        sorted_strings(&self.weekdays)
    }

    /// Sum a measure over every row.
    pub fn sum(&self, measure: Measure) -> u64 {
        (0..self.row_count).map(|i| self.measure_at(i, measure)).sum()
    }

    pub fn interner_stats(&self, facet: Facet) -> Option<InternerStats> {
        self.facet_interner(facet).map(|i| i.stats())
    }
}

fn sorted_strings(interner: &StringInterner) -> Vec<&str> {
    let mut values: Vec<&str> = interner.iter().map(|(_, s)| s).collect();
    values.sort_unstable();
    values
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Dataset {{ name: '{}', rows: {}, countries: {}, weekdays: {} }}",
            self.name,
            self.row_count,
            self.countries.len(),
            self.weekdays.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "video_id,trending_date,title,channel_title,category_id,publish_time,tags,views,likes,dislikes,comment_count,publish_country,published_day_of_week";

    fn csv_with(rows: &[&str]) -> String {
        let mut csv = String::from(HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        csv
    }

    #[test]
    fn test_dataset_from_reader() {
        let csv = csv_with(&[
            "v1,17.14.11,Cat Video,Pets Daily,15,2017-11-13,cats,748374,57527,2966,15954,US,Monday",
            "v2,17.14.11,\"Trailer, Official\",Studio,1,2017-11-12,film,2418783,97185,6146,12703,CA,Sunday",
        ]);
        let dataset = Dataset::from_reader("trending", csv.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.name(), "trending");

        let row = dataset.get_row(1).unwrap();
        assert_eq!(row.index, 1);
        assert_eq!(row.title, "Trailer, Official");
        assert_eq!(row.channel_title, "Studio");
        assert_eq!(row.category_id, 1);
        assert_eq!(row.views, 2418783);
        assert_eq!(row.comment_count, 12703);
        assert_eq!(row.publish_country, "CA");
        assert_eq!(row.published_day_of_week, "Sunday");
    }

    #[test]
    fn test_dataset_keeps_free_text_as_written() {
        let csv = csv_with(&["v1,d,\"  Spaced Title \",Chan ,10,t,x, 42 ,1,0,2,US,Monday"]);
        let dataset = Dataset::from_reader("t", csv.as_bytes()).unwrap();
        let row = dataset.get_row(0).unwrap();
        assert_eq!(row.title, "  Spaced Title ");
        assert_eq!(row.channel_title, "Chan ");
        assert_eq!(row.views, 42);
    }

    #[test]
    fn test_dataset_trims_header_names() {
        let csv = format!("{}\nv1,d,A,B,10,t,x,5,2,0,1,US,Monday", HEADER.replace(",views,", ", views ,"));
        let dataset = Dataset::from_reader("t", csv.as_bytes()).unwrap();
        assert_eq!(dataset.sum(Measure::Views), 5);
    }

    #[test]
    fn test_dataset_missing_column() {
        let csv = "title,channel_title,category_id,views,likes,publish_country,published_day_of_week\nA,B,1,2,3,US,Monday";
        let err = Dataset::from_reader("bad", csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "comment_count"));
    }

    #[test]
    fn test_dataset_invalid_numeric_reports_line() {
        let csv = csv_with(&[
            "v1,d,A,B,10,t,x,100,1,0,1,US,Monday",
            "v2,d,C,D,10,t,x,many,1,0,1,US,Monday",
        ]);
        let err = Dataset::from_reader("bad", csv.as_bytes()).unwrap_err();
        match err {
            DataError::InvalidValue { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "views");
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dataset_header_only() {
        let dataset = Dataset::from_reader("empty", HEADER.as_bytes()).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.categories().is_empty());
        assert_eq!(dataset.sum(Measure::Views), 0);
    }

    #[test]
    fn test_dataset_distinct_values_sorted() {
        let csv = csv_with(&[
            "v1,d,A,B,24,t,x,1,1,0,1,US,Tuesday",
            "v2,d,A,B,10,t,x,1,1,0,1,GB,Monday",
            "v3,d,A,B,24,t,x,1,1,0,1,CA,Tuesday",
            "v4,d,A,B,1,t,x,1,1,0,1,US,Friday",
        ]);
        let dataset = Dataset::from_reader("t", csv.as_bytes()).unwrap();

        assert_eq!(dataset.categories(), vec![1, 10, 24]);
        assert_eq!(dataset.countries(), vec!["CA", "GB", "US"]);
        assert_eq!(dataset.weekdays(), vec!["Friday", "Monday", "Tuesday"]);

        let stats = dataset.interner_stats(Facet::Country).unwrap();
        assert_eq!(stats.unique_strings, 3);
        assert_eq!(stats.total_references, 4);
        assert!(dataset.interner_stats(Facet::Category).is_none());
    }

    #[test]
    fn test_dataset_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", csv_with(&["v1,d,A,B,10,t,x,5,2,0,1,US,Monday"])).unwrap();

        let dataset = Dataset::from_path(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.sum(Measure::Views), 5);
    }

    #[test]
    fn test_dataset_from_missing_path() {
        let err = Dataset::from_path("/definitely/not/here/youtube.csv").unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
        assert!(err.to_string().contains("youtube.csv"));
    }

    #[test]
    fn test_dataset_get_row_out_of_range() {
        let dataset = Dataset::from_records("t", vec![VideoRecord::default()]);
        assert!(dataset.get_row(0).is_ok());
        assert_eq!(dataset.get_row(1).unwrap_err(), "Row 1 out of range [0, 1)");
    }

    #[test]
    fn test_dataset_from_records_preserves_order() {
        let records = (0..5).map(|i| VideoRecord {
            views: 10 * i,
            title: format!("video {i}"),
            ..Default::default()
        });
        let dataset = Dataset::from_records("t", records);

        let titles: Vec<&str> = dataset.iter_rows().map(|r| r.title).collect();
        assert_eq!(titles, vec!["video 0", "video 1", "video 2", "video 3", "video 4"]);
        assert_eq!(dataset.sum(Measure::Views), 100);
    }
}
