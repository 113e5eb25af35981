#[derive(Copy, Clone, Debug, Default)]
pub struct StepStats {
    pub joints_driven: u32,
    pub saturated: u32,
}
