use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::Workbook;

const HEADERS: [&str; 13] = [
    "Název", "Lokalita", "Cena", "m2", "Výnos %", "Zdroj", "URL", "Obrazek", "JePodil",
    "JeDrazba", "Lat", "Lon", "Popis",
];

/// City name with an approximate centre.
const CITIES: [(&str, f64, f64); 6] = [
    ("Praha", 50.0755, 14.4378),
    ("Brno", 49.1951, 16.6068),
    ("Ostrava", 49.8209, 18.2625),
    ("Plzeň", 49.7384, 13.3736),
    ("Ústí nad Labem", 50.6607, 14.0323),
    ("Kladno", 50.1473, 14.1029),
];

const SOURCES: [&str; 3] = ["Sreality", "Bezrealitky", "iDnes"];

const DESCRIPTION_PARTS: [&str; 12] = [
    "Byt po kompletní rekonstrukci.",
    "Dům v původním stavu.",
    "Novostavba s energetickou třídou B.",
    "Cihlový dům.",
    "Panelový dům po revitalizaci.",
    "K bytu náleží balkon.",
    "Prostorná lodžie.",
    "Terasa s výhledem.",
    "Předzahrádka u domu.",
    "Sklep v suterénu.",
    "Výtah v domě.",
    "Parkování před domem, možnost garáže.",
];

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct SampleListing {
    title: String,
    locality: String,
    price: f64,
    area: f64,
    yield_percent: f64,
    source: String,
    url: String,
    images: Option<String>,
    is_share: bool,
    is_auction: bool,
    lat: f64,
    lon: f64,
    description: String,
}

fn generate(rng: &mut SimpleRng, count: usize) -> Vec<SampleListing> {
    (0..count)
        .map(|i| {
            let (city, lat, lon) = *rng.pick(&CITIES);
            let area = rng.range(25.0, 110.0).round();
            let price = (area * rng.range(35_000.0, 120_000.0) / 10_000.0).round() * 10_000.0;
            let yield_percent = (rng.range(2.0, 11.0) * 10.0).round() / 10.0;

            let photo_count = (rng.next_u64() % 5) as usize;
            let images = (photo_count > 0).then(|| {
                (0..photo_count)
                    .map(|p| format!("https://picsum.photos/seed/{i}-{p}/640/420"))
                    .collect::<Vec<_>>()
                    .join(";;;")
            });

            let description = DESCRIPTION_PARTS
                .iter()
                .filter(|_| rng.chance(0.25))
                .copied()
                .collect::<Vec<_>>()
                .join(" ");

            let located = rng.chance(0.8);
            SampleListing {
                title: format!("Prodej bytu {} m², {city}", area),
                locality: city.to_string(),
                price,
                area,
                yield_percent,
                source: rng.pick(&SOURCES).to_string(),
                url: format!("https://example.cz/inzerat/{i}"),
                images,
                is_share: rng.chance(0.08),
                is_auction: rng.chance(0.1),
                lat: if located { lat + rng.range(-0.05, 0.05) } else { 0.0 },
                lon: if located { lon + rng.range(-0.08, 0.08) } else { 0.0 },
                description,
            }
        })
        .collect()
}

fn write_xlsx(rows: &[SampleListing], path: &str) -> Result<(), rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, l) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &l.title)?;
        sheet.write_string(r, 1, &l.locality)?;
        sheet.write_number(r, 2, l.price)?;
        sheet.write_number(r, 3, l.area)?;
        sheet.write_number(r, 4, l.yield_percent)?;
        sheet.write_string(r, 5, &l.source)?;
        sheet.write_string(r, 6, &l.url)?;
        if let Some(images) = &l.images {
            sheet.write_string(r, 7, images)?;
        }
        sheet.write_boolean(r, 8, l.is_share)?;
        sheet.write_boolean(r, 9, l.is_auction)?;
        sheet.write_number(r, 10, l.lat)?;
        sheet.write_number(r, 11, l.lon)?;
        sheet.write_string(r, 12, &l.description)?;
    }

    workbook.save(path)
}

fn write_parquet(rows: &[SampleListing], path: &str) {
    let strings = |f: fn(&SampleListing) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let numbers = |f: fn(&SampleListing) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let flags = |f: fn(&SampleListing) -> bool| -> ArrayRef {
        Arc::new(BooleanArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let images: ArrayRef = Arc::new(StringArray::from(
        rows.iter().map(|l| l.images.as_deref()).collect::<Vec<_>>(),
    ));

    let schema = Arc::new(Schema::new(vec![
        Field::new(HEADERS[0], DataType::Utf8, false),
        Field::new(HEADERS[1], DataType::Utf8, false),
        Field::new(HEADERS[2], DataType::Float64, false),
        Field::new(HEADERS[3], DataType::Float64, false),
        Field::new(HEADERS[4], DataType::Float64, false),
        Field::new(HEADERS[5], DataType::Utf8, false),
        Field::new(HEADERS[6], DataType::Utf8, false),
        Field::new(HEADERS[7], DataType::Utf8, true),
        Field::new(HEADERS[8], DataType::Boolean, false),
        Field::new(HEADERS[9], DataType::Boolean, false),
        Field::new(HEADERS[10], DataType::Float64, false),
        Field::new(HEADERS[11], DataType::Float64, false),
        Field::new(HEADERS[12], DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            strings(|l| &l.title),
            strings(|l| &l.locality),
            numbers(|l| l.price),
            numbers(|l| l.area),
            numbers(|l| l.yield_percent),
            strings(|l| &l.source),
            strings(|l| &l.url),
            images,
            flags(|l| l.is_share),
            flags(|l| l.is_auction),
            numbers(|l| l.lat),
            numbers(|l| l.lon),
            strings(|l| &l.description),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng, 240);

    let xlsx_path = "INVESTICNI_HITPARADA_sample.xlsx";
    write_xlsx(&rows, xlsx_path).expect("Failed to write workbook");

    let parquet_path = "sample_listings.parquet";
    write_parquet(&rows, parquet_path);

    println!(
        "Wrote {} listings to {xlsx_path} and {parquet_path}",
        rows.len()
    );
}
