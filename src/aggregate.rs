//! Summary statistics over the loaded dataset: KPI scalars, per-category
//! tables, and the top-videos ranking.
//!
//! Every operation tolerates any subset of the expected columns being
//! absent: a missing column degrades only the statistics that depend on it
//! (empty table or zero scalar), never the whole dashboard.

use color_eyre::Result;
use polars::prelude::*;

/// Default size of the top-videos ranking.
pub const TOP_VIDEOS_DEFAULT: usize = 10;

/// One row of the top-videos ranking, carrying whichever of the original
/// fields exist in the dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct TopVideo {
    /// `title` when the column exists, otherwise the record's original
    /// position in the dataset.
    pub label: String,
    pub views: u64,
    pub channel_title: Option<String>,
    pub category_id: Option<String>,
    pub likes: Option<f64>,
}

/// All derived values the dashboard renders, computed in one pass over an
/// immutable dataset.
#[derive(Clone, Debug, Default)]
pub struct DashboardStats {
    pub total_videos: usize,
    pub total_channels: usize,
    pub max_views: u64,
    pub average_engagement: f64,
    pub views_by_category: Vec<(String, f64)>,
    pub engagement_by_category: Vec<(String, f64)>,
    pub top_videos: Vec<TopVideo>,
}

impl DashboardStats {
    pub fn compute(df: &DataFrame, top_n: usize) -> Result<DashboardStats> {
        Ok(DashboardStats {
            total_videos: total_videos(df),
            total_channels: total_channels(df)?,
            max_views: max_views(df)?,
            average_engagement: average_engagement(df)?,
            views_by_category: views_by_category(df)?,
            engagement_by_category: engagement_by_category(df)?,
            top_videos: top_videos_by_views(df, top_n)?,
        })
    }
}

fn has_column(df: &DataFrame, name: &str) -> bool {
    df.schema().get(name).is_some()
}

/// Number of records in the dataset. Always defined.
pub fn total_videos(df: &DataFrame) -> usize {
    df.height()
}

/// Number of distinct non-null `channel_title` values; 0 if the column is
/// absent.
pub fn total_channels(df: &DataFrame) -> Result<usize> {
    if !has_column(df, "channel_title") {
        return Ok(0);
    }
    let series = df.column("channel_title")?.as_materialized_series();
    let mut unique = series.n_unique()?;
    // n_unique counts null as a value; a null channel is not a channel
    if series.null_count() > 0 {
        unique -= 1;
    }
    Ok(unique)
}

/// Maximum of `views`, truncated to an integer; 0 if the column is absent
/// or the dataset is empty.
pub fn max_views(df: &DataFrame) -> Result<u64> {
    if !has_column(df, "views") {
        return Ok(0);
    }
    let views = df.column("views")?.cast(&DataType::Float64)?;
    let max = views.f64()?.max().unwrap_or(0.0);
    Ok(max.max(0.0).trunc() as u64)
}

/// Mean of `likes / views` over records with `views > 0` and a non-null
/// `likes`; 0 when either column is absent or no record qualifies.
///
/// The `views > 0` filter is the division guard: the ratio is only ever
/// computed on qualifying records, so no NaN or infinity can appear.
pub fn average_engagement(df: &DataFrame) -> Result<f64> {
    if !has_column(df, "views") || !has_column(df, "likes") {
        return Ok(0.0);
    }
    let views = df.column("views")?.cast(&DataType::Float64)?;
    let views = views.f64()?;
    let likes = df.column("likes")?.cast(&DataType::Float64)?;
    let likes = likes.f64()?;

    let mut sum = 0.0;
    let mut count = 0usize;
    for i in 0..df.height() {
        let v = views.get(i).unwrap_or(0.0);
        if v <= 0.0 {
            continue;
        }
        if let Some(l) = likes.get(i) {
            sum += l / v;
            count += 1;
        }
    }

    if count == 0 {
        Ok(0.0)
    } else {
        Ok(sum / count as f64)
    }
}

/// Per-category sum of `views`, descending. Empty when either column is
/// absent. Records with a null category are dropped.
pub fn views_by_category(df: &DataFrame) -> Result<Vec<(String, f64)>> {
    if !has_column(df, "category_id") || !has_column(df, "views") {
        return Ok(Vec::new());
    }
    let out = df
        .clone()
        .lazy()
        .filter(col("category_id").is_not_null())
        .group_by([col("category_id").cast(DataType::String)])
        .agg([col("views").cast(DataType::Float64).sum()])
        .sort(
            ["views"],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()?;
    category_table(&out, "views")
}

/// Per-category mean of `likes / views` over the engagement-eligible subset
/// (`views > 0`, `likes` non-null), descending. An empty eligible subset
/// yields an empty table, signalling "insufficient data" to the caller.
pub fn engagement_by_category(df: &DataFrame) -> Result<Vec<(String, f64)>> {
    if !has_column(df, "category_id") || !has_column(df, "views") || !has_column(df, "likes") {
        return Ok(Vec::new());
    }
    let out = df
        .clone()
        .lazy()
        .filter(
            col("category_id")
                .is_not_null()
                .and(col("views").cast(DataType::Float64).gt(lit(0.0)))
                .and(col("likes").is_not_null()),
        )
        .with_column(
            (col("likes").cast(DataType::Float64) / col("views").cast(DataType::Float64))
                .alias("engagement"),
        )
        .group_by([col("category_id").cast(DataType::String)])
        .agg([col("engagement").mean()])
        .sort(
            ["engagement"],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()?;
    category_table(&out, "engagement")
}

fn category_table(out: &DataFrame, value_column: &str) -> Result<Vec<(String, f64)>> {
    let categories = out.column("category_id")?.str()?;
    let values = out.column(value_column)?.f64()?;
    let mut table = Vec::with_capacity(out.height());
    for i in 0..out.height() {
        if let Some(category) = categories.get(i) {
            table.push((category.to_string(), values.get(i).unwrap_or(0.0)));
        }
    }
    Ok(table)
}

/// The `n` records with the largest `views`, descending, ties kept in
/// original dataset order. Empty when `views` is absent.
pub fn top_videos_by_views(df: &DataFrame, n: usize) -> Result<Vec<TopVideo>> {
    if !has_column(df, "views") || n == 0 {
        return Ok(Vec::new());
    }
    let out = df
        .clone()
        .lazy()
        .with_row_index("index", None)
        .with_column(col("views").cast(DataType::Float64))
        .sort(
            ["views"],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true)
                .with_nulls_last(true),
        )
        .limit(n as IdxSize)
        .collect()?;

    let indices = out.column("index")?.u32()?;
    let views = out.column("views")?.f64()?;
    let has_title = has_column(&out, "title");
    let has_channel = has_column(&out, "channel_title");
    let has_category = has_column(&out, "category_id");
    let has_likes = has_column(&out, "likes");

    let mut videos = Vec::with_capacity(out.height());
    for i in 0..out.height() {
        let label = if has_title {
            match out.column("title")?.get(i)? {
                AnyValue::Null => indices.get(i).unwrap_or(0).to_string(),
                value => value.str_value().to_string(),
            }
        } else {
            indices.get(i).unwrap_or(0).to_string()
        };

        let channel_title = if has_channel {
            string_value(out.column("channel_title")?, i)?
        } else {
            None
        };
        let category_id = if has_category {
            string_value(out.column("category_id")?, i)?
        } else {
            None
        };
        let likes = if has_likes {
            let likes = out.column("likes")?.cast(&DataType::Float64)?;
            likes.f64()?.get(i)
        } else {
            None
        };

        videos.push(TopVideo {
            label,
            views: views.get(i).unwrap_or(0.0).max(0.0).trunc() as u64,
            channel_title,
            category_id,
            likes,
        });
    }
    Ok(videos)
}

fn string_value(column: &Column, i: usize) -> Result<Option<String>> {
    match column.get(i)? {
        AnyValue::Null => Ok(None),
        value => Ok(Some(value.str_value().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "title" => &["a", "b", "c"],
            "channel_title" => &["ch1", "ch1", "ch2"],
            "category_id" => &["A", "A", "B"],
            "views" => &[100.0_f64, 0.0, 50.0],
            "likes" => &[10.0_f64, 5.0, 25.0],
        )
        .unwrap()
    }

    #[test]
    fn kpis_on_sample() {
        let df = sample();
        assert_eq!(total_videos(&df), 3);
        assert_eq!(total_channels(&df).unwrap(), 2);
        assert_eq!(max_views(&df).unwrap(), 100);
        // mean(10/100, 25/50) = mean(0.10, 0.50) = 0.30
        let engagement = average_engagement(&df).unwrap();
        assert!((engagement - 0.30).abs() < 1e-12);
    }

    #[test]
    fn category_tables_on_sample() {
        let df = sample();
        assert_eq!(
            views_by_category(&df).unwrap(),
            vec![("A".to_string(), 100.0), ("B".to_string(), 50.0)]
        );
        assert_eq!(
            engagement_by_category(&df).unwrap(),
            vec![("B".to_string(), 0.50), ("A".to_string(), 0.10)]
        );
    }

    #[test]
    fn empty_dataset() {
        let df = DataFrame::empty();
        let stats = DashboardStats::compute(&df, TOP_VIDEOS_DEFAULT).unwrap();
        assert_eq!(stats.total_videos, 0);
        assert_eq!(stats.total_channels, 0);
        assert_eq!(stats.max_views, 0);
        assert_eq!(stats.average_engagement, 0.0);
        assert!(stats.views_by_category.is_empty());
        assert!(stats.engagement_by_category.is_empty());
        assert!(stats.top_videos.is_empty());
    }

    #[test]
    fn empty_dataset_with_columns() {
        let df = df!(
            "views" => Vec::<f64>::new(),
            "likes" => Vec::<f64>::new(),
            "category_id" => Vec::<String>::new(),
        )
        .unwrap();
        assert_eq!(max_views(&df).unwrap(), 0);
        assert_eq!(average_engagement(&df).unwrap(), 0.0);
        assert!(views_by_category(&df).unwrap().is_empty());
        assert!(engagement_by_category(&df).unwrap().is_empty());
        assert!(top_videos_by_views(&df, 10).unwrap().is_empty());
    }

    #[test]
    fn engagement_zero_when_no_views_positive() {
        let df = df!(
            "views" => &[0.0_f64, 0.0],
            "likes" => &[5.0_f64, 7.0],
        )
        .unwrap();
        let engagement = average_engagement(&df).unwrap();
        assert_eq!(engagement, 0.0);
        assert!(engagement.is_finite());
    }

    #[test]
    fn engagement_skips_null_likes() {
        let df = df!(
            "views" => &[100.0_f64, 200.0],
            "likes" => &[Some(10.0_f64), None],
        )
        .unwrap();
        // only the first record qualifies
        assert!((average_engagement(&df).unwrap() - 0.10).abs() < 1e-12);
    }

    #[test]
    fn missing_columns_degrade_silently() {
        let df = df!("title" => &["a", "b"]).unwrap();
        assert_eq!(total_videos(&df), 2);
        assert_eq!(total_channels(&df).unwrap(), 0);
        assert_eq!(max_views(&df).unwrap(), 0);
        assert_eq!(average_engagement(&df).unwrap(), 0.0);
        assert!(views_by_category(&df).unwrap().is_empty());
        assert!(engagement_by_category(&df).unwrap().is_empty());
        assert!(top_videos_by_views(&df, 10).unwrap().is_empty());
    }

    #[test]
    fn removing_channel_title_changes_nothing_else() {
        let full = sample();
        let reduced = full.drop("channel_title").unwrap();
        assert_eq!(total_channels(&reduced).unwrap(), 0);
        assert_eq!(total_videos(&full), total_videos(&reduced));
        assert_eq!(max_views(&full).unwrap(), max_views(&reduced).unwrap());
        assert_eq!(
            average_engagement(&full).unwrap(),
            average_engagement(&reduced).unwrap()
        );
        assert_eq!(
            views_by_category(&full).unwrap(),
            views_by_category(&reduced).unwrap()
        );
        assert_eq!(
            engagement_by_category(&full).unwrap(),
            engagement_by_category(&reduced).unwrap()
        );
    }

    #[test]
    fn null_channels_do_not_count() {
        let df = df!("channel_title" => &[Some("ch1"), None, Some("ch1")]).unwrap();
        assert_eq!(total_channels(&df).unwrap(), 1);
    }

    #[test]
    fn null_categories_are_dropped() {
        let df = df!(
            "category_id" => &[Some("A"), None, Some("A")],
            "views" => &[10.0_f64, 99.0, 5.0],
        )
        .unwrap();
        assert_eq!(
            views_by_category(&df).unwrap(),
            vec![("A".to_string(), 15.0)]
        );
    }

    #[test]
    fn category_tables_sorted_descending() {
        let df = df!(
            "category_id" => &["A", "B", "C", "B"],
            "views" => &[5.0_f64, 100.0, 30.0, 1.0],
            "likes" => &[1.0_f64, 10.0, 30.0, 1.0],
        )
        .unwrap();
        let by_views = views_by_category(&df).unwrap();
        assert!(by_views.windows(2).all(|w| w[0].1 >= w[1].1));
        let by_engagement = engagement_by_category(&df).unwrap();
        assert!(by_engagement.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(by_views.len(), 3);
        assert_eq!(by_engagement.len(), 3);
    }

    #[test]
    fn top_videos_ranked_and_truncated() {
        let df = df!(
            "title" => &["low", "high", "mid"],
            "views" => &[1.0_f64, 100.0, 50.0],
        )
        .unwrap();
        let top = top_videos_by_views(&df, 2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].label, "high");
        assert_eq!(top[0].views, 100);
        assert_eq!(top[1].label, "mid");
    }

    #[test]
    fn top_videos_ties_keep_dataset_order() {
        let df = df!(
            "title" => &["first", "second", "third"],
            "views" => &[10.0_f64, 10.0, 10.0],
        )
        .unwrap();
        let top = top_videos_by_views(&df, 3).unwrap();
        let labels: Vec<&str> = top.iter().map(|v| v.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }

    #[test]
    fn top_videos_fall_back_to_position_label() {
        let df = df!("views" => &[5.0_f64, 50.0]).unwrap();
        let top = top_videos_by_views(&df, 10).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].label, "1");
        assert_eq!(top[1].label, "0");
    }

    #[test]
    fn top_videos_carry_original_fields() {
        let df = sample();
        let top = top_videos_by_views(&df, 1).unwrap();
        assert_eq!(top[0].label, "a");
        assert_eq!(top[0].channel_title.as_deref(), Some("ch1"));
        assert_eq!(top[0].category_id.as_deref(), Some("A"));
        assert_eq!(top[0].likes, Some(10.0));
    }

    #[test]
    fn compute_bundles_everything() {
        let stats = DashboardStats::compute(&sample(), 2).unwrap();
        assert_eq!(stats.total_videos, 3);
        assert_eq!(stats.top_videos.len(), 2);
        assert_eq!(stats.views_by_category.len(), 2);
    }
}
