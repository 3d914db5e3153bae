use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const COLUMNS: [&str; 5] = ["name", "ingredients", "instructions", "cuisine", "diet"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (cuisine, dishes, staple ingredients, method)
const KITCHENS: &[(&str, &[&str], &[&str], &str)] = &[
    (
        "Indian",
        &["Dal Tadka", "Chana Masala", "Palak Paneer", "Aloo Gobi"],
        &["lentils", "chickpeas", "turmeric", "cumin", "ginger", "ghee", "spinach"],
        "Temper the spices in hot ghee, add the base and simmer until thick.",
    ),
    (
        "Italian",
        &["Risotto", "Minestrone", "Pasta al Limone", "Caponata"],
        &["arborio rice", "parmesan", "olive oil", "garlic", "basil", "tomatoes"],
        "Sweat the aromatics in olive oil, add the rest and cook gently.",
    ),
    (
        "Thai",
        &["Green Curry", "Pad Thai", "Tom Kha"],
        &["coconut milk", "lemongrass", "rice noodles", "lime", "fish sauce"],
        "Fry the paste until fragrant, add coconut milk and simmer briefly.",
    ),
    (
        "Mexican",
        &["Black Bean Tacos", "Pozole", "Chilaquiles"],
        &["black beans", "corn tortillas", "chipotle", "onion", "cilantro"],
        "Char the chiles, blend the sauce and combine with the filling.",
    ),
    (
        "Japanese",
        &["Miso Soup", "Okonomiyaki"],
        &["miso", "dashi", "tofu", "cabbage", "spring onion"],
        "Warm the dashi, whisk in the miso off the heat and add the garnish.",
    ),
];

const DIETS: &[&str] = &["Vegetarian", "Vegan", "Non Vegetarian", "Gluten Free", "High Protein"];

fn generate_rows(rng: &mut SimpleRng, count: usize) -> Vec<[Option<String>; 5]> {
    (0..count)
        .map(|_| {
            let (cuisine, dishes, staples, method) =
                KITCHENS[(rng.next_u64() % KITCHENS.len() as u64) as usize];

            let name = rng.pick(dishes).to_string();
            let ingredients = if rng.chance(0.05) {
                None
            } else if rng.chance(0.1) {
                Some(rng.pick(staples).to_string())
            } else {
                let n = 3 + (rng.next_u64() % 3) as usize;
                let picked: Vec<&str> = (0..n).map(|_| rng.pick(staples)).collect();
                Some(picked.join(", "))
            };
            let instructions = if rng.chance(0.05) {
                None
            } else if rng.chance(0.08) {
                Some("Cook.".to_string())
            } else {
                Some(method.to_string())
            };
            let cuisine = (!rng.chance(0.03)).then(|| cuisine.to_string());
            let diet = (!rng.chance(0.1)).then(|| rng.pick(DIETS).to_string());

            [Some(name), ingredients, instructions, cuisine, diet]
        })
        .collect()
}

fn write_csv(path: &str, rows: &[[Option<String>; 5]]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[[Option<String>; 5]]) -> Result<()> {
    let schema = Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let columns: Vec<ArrayRef> = (0..COLUMNS.len())
        .map(|i| {
            let values: StringArray = rows.iter().map(|row| row[i].as_deref()).collect();
            Arc::new(values) as ArrayRef
        })
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng, 250);

    write_csv("cuisines.csv", &rows)?;
    write_parquet("cuisines.parquet", &rows)?;

    println!("Wrote {} recipes to cuisines.csv and cuisines.parquet", rows.len());
    Ok(())
}
