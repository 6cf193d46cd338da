/// Scenario played when no `--file` is given.
pub(crate) const DEMO_SCENARIO: &str = "\
# Madre de Dios, ten columns by eight rows
C - 10 - 8
M - 1 - 0
M - 2 - 1
M - 2 - 4
M - 5 - 7
T - 0 - 3 - 2
T - 1 - 7 - 3
T - 6 - 0 - 3
T - 6 - 4 - 6
T - 5 - 2 - 2
T - 4 - 6 - 5
T - 1 - 3 - 3
A - Lara - 1 - 1 - S - AADADAGGAGGAAGGAGAGA
A - Indiana - 1 - 2 - S - AADDAGADADAGGAAA
A - Yves - 3 - 5 - E - AADDAGADADAGGAAA
A - Tom - 7 - 5 - W - DAADADAGAGADAGAADAGGA
A - Amande - 6 - 4 - W - AADAADADAGAGADAGAADAGGA
";
