use crate::{plotting::chart_kind::ChartKind, report::RunReport};

impl RunReport {
    pub fn title(&self, kind: ChartKind) -> String {
        if let Some(remark) = &self.params.remark {
            format!("{} - {} Run ({})", kind, self.params.kind, remark)
        } else {
            format!("{} - {} Run", kind, self.params.kind)
        }
    }
}
