use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChartKind {
    #[display("Throughput")]
    Throughput,
    #[display("Latency")]
    Latency,
}
