//! Given steps for spreadsheet import BDD scenarios.

use super::world::ImportWorld;
use rstest_bdd_macros::given;

#[given(r#"a spreadsheet listing task numbers "{numbers}""#)]
fn spreadsheet_listing(world: &mut ImportWorld, numbers: String) {
    let mut csv = String::from("number,comment\n");
    for number in numbers.split(',') {
        csv.push_str(number);
        csv.push_str(",\n");
    }
    world.file = Some(csv.into_bytes());
}
