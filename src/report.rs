//! Fixed page text: headings, chart captions and the conclusion.

use crate::charts::ChartKind;

pub const PAGE_TITLE: &str = "Sales Dashboard";
pub const HEADING: &str = "📊 Diwali Sales Dashboard";

/// Heading and caption shown above a chart.
pub struct Section {
    pub heading: &'static str,
    pub caption: &'static [&'static str],
}

pub fn section(kind: ChartKind) -> Section {
    match kind {
        ChartKind::AgeHistogram => Section {
            heading: "Age Distribution with Kernel Density Estimate",
            caption: &["This captivating histogram beautifully captures the age distribution within our dataset, \
                showcasing a rich variety of customer age groups. \
                The Light Sea Green bars stand out against the dark background, highlighting the frequency of different ages"],
        },
        ChartKind::OccupationByGender => Section {
            heading: "Occupation-wise Sales Disaggregation by Gender",
            caption: &["This compelling bar plot presents a detailed breakdown of \
                sales across various occupations, each distinctively represented by gender"],
        },
        ChartKind::ZoneSales => Section {
            heading: "Top Zones by Sales",
            caption: &["This dynamic bar chart showcases the top-performing zones in terms of sales, \
                offering a clear visual representation of revenue generation across different areas"],
        },
        ChartKind::TopOccupations => Section {
            heading: "Top 10 Occupations by Total Amount",
            caption: &[
                "The bar chart displays the top 10 occupations based on the total amount in our dataset",
                "These occupations represent the highest financial contributions within our records",
            ],
        },
        ChartKind::OccupationTrend => Section {
            heading: "Financial Trends Across Occupations",
            caption: &["The line plot above illustrates the financial trends across various occupations in our dataset. \
                Each point on the line represents the amount associated with a specific occupation, \
                offering a glimpse into the financial contributions of different professions"],
        },
        ChartKind::GenderShare => Section {
            heading: "Gender Distribution Overview",
            caption: &["This pie chart provides a visual representation of the gender distribution within our dataset. \
                It illustrates the proportion of each gender category, \
                giving us insights into the diversity of our data"],
        },
    }
}

pub const CONCLUSION_HEADING: &str = "conclusion";

// Items 3 to 5 repeat the zone summary word for word in the source report;
// kept as published.
pub const CONCLUSION: [&str; 6] = [
    "1.The visualization illustrates the diverse age distribution of customers in the dataset, \
     with prominent peaks in the 26-35 age group, represented by Light Sea Green bars against a dark background.\n\
     esents the gender distribution in the dataset, showcasing the diversity with 51.2% male and 48.8% female records.",
    "2.The visualization provides a comprehensive breakdown of sales across different occupations, \
     highlighting gender disparities, with distinct representations for each occupation.",
    "3.The visualization highlights the top-performing sales zones, emphasizing revenue generation disparities \
     across different areas, with vibrant pink bars against a black background.",
    "4.The visualization highlights the top-performing sales zones, emphasizing revenue generation disparities \
     across different areas, with vibrant pink bars against a black background.",
    "5.The visualization highlights the top-performing sales zones, emphasizing revenue generation disparities \
     across different areas, with vibrant pink bars against a black background.",
    "6.The pie chart visually represents the gender distribution in the dataset, \
     showcasing the diversity with 51.2% male and 48.8% female records.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_chart_has_a_section() {
        for kind in ChartKind::ALL {
            let s = section(kind);
            assert!(!s.heading.is_empty());
            assert!(!s.caption.is_empty());
        }
    }

    #[test]
    fn duplicated_conclusion_items_are_kept() {
        assert_eq!(CONCLUSION[2][2..], CONCLUSION[3][2..]);
        assert_eq!(CONCLUSION[3][2..], CONCLUSION[4][2..]);
    }
}
