use charming::{
    component::{
        Axis, DataView, Feature, Grid, Legend, LegendSelectedMode, LegendType, Restore,
        SaveAsImage, Title, Toolbox,
    },
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, LineStyle, NameLocation,
        Orient, SplitLine, Symbol, TextAlign, TextStyle, Tooltip,
    },
    series::Line,
    Chart,
};

pub struct StrainChart {
    pub inner: Chart,
}

const AXIS_TEXT_SIZE: u32 = 16;

impl StrainChart {
    /// Create a new `StrainChart` with default tooltip, legend, grid, and toolbox.
    pub fn new(title: &str, subtext: &str, dark: bool, strip_title_and_subtext: bool) -> Self {
        let chart = Chart::new();
        let chart = if !strip_title_and_subtext {
            chart.title(
                Title::new()
                    .text(title)
                    .text_align(TextAlign::Center)
                    .subtext(subtext)
                    .text_style(TextStyle::new().font_size(24).font_weight("bold"))
                    .subtext_style(TextStyle::new().font_size(14).line_height(20))
                    .left("50%")
                    .top("1%"),
            )
        } else {
            chart
        };
        let grid_top = if !strip_title_and_subtext {
            "16%"
        } else {
            "4%"
        };

        let chart = chart
            .tooltip(Tooltip::new().axis_pointer(AxisPointer::new().type_(AxisPointerType::Cross)))
            .legend(
                Legend::new()
                    .show(true)
                    .right("2%")
                    .top("middle")
                    .orient(Orient::Vertical)
                    .selected_mode(LegendSelectedMode::Multiple)
                    .text_style(TextStyle::new().font_size(12))
                    .type_(LegendType::Scroll),
            )
            .grid(
                Grid::new()
                    .left("5%")
                    .right("20%")
                    .top(grid_top)
                    .bottom("8%"),
            )
            .toolbox(
                Toolbox::new().feature(
                    Feature::new()
                        .data_view(DataView::new())
                        .restore(Restore::new())
                        .save_as_image(SaveAsImage::new()),
                ),
            );

        let chart = if dark {
            chart.background_color("#242424")
        } else {
            chart
        };

        Self { inner: chart }
    }

    /// Configure the X axis with one category per batch.
    pub fn with_category_x_axis(mut self, axis_label: &str, categories: Vec<String>) -> Self {
        self.inner = self.inner.x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name(axis_label)
                .name_location(NameLocation::End)
                .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
                .name_gap(15)
                .data(categories)
                .split_line(SplitLine::new().show(true)),
        );
        self
    }

    pub fn with_y_axis(mut self, axis_label: &str) -> Self {
        self.inner = self.inner.y_axis(value_axis(axis_label, "left"));
        self
    }

    /// Left axis for `y1_label`, right axis for `y2_label`.
    pub fn with_dual_y_axis(mut self, y1_label: &str, y2_label: &str) -> Self {
        self.inner = self
            .inner
            .y_axis(value_axis(y1_label, "left"))
            .y_axis(value_axis(y2_label, "right"));
        self
    }

    pub fn add_series(self, name: &str, data: Vec<f64>, symbol: Symbol, color: &str) -> Self {
        self.add_dual_series(name, data, symbol, color, 0)
    }

    pub fn add_dual_series(
        mut self,
        name: &str,
        data: Vec<f64>,
        symbol: Symbol,
        color: &str,
        y_axis_index: usize,
    ) -> Self {
        let line = Line::new()
            .name(name)
            .data(data)
            .symbol(symbol)
            .symbol_size(8.0)
            .line_style(LineStyle::new().width(3.0))
            .item_style(ItemStyle::new().color(color))
            .y_axis_index(y_axis_index as f64);

        self.inner = self.inner.series(line);
        self
    }
}

fn value_axis(label: &str, position: &str) -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .name(label)
        .name_location(NameLocation::End)
        .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
        .name_gap(15)
        .position(position)
        .axis_label(AxisLabel::new())
        .split_line(SplitLine::new().show(true))
}
