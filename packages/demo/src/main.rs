//! Writes a small sample dataset into a local store, lists it back as raw
//! JSON, and deserializes the records into typed values.

use serde::{Deserialize, Serialize};

use jotdb_store::{Driver, Options};

#[derive(Serialize, Deserialize, Debug, Clone)]
struct Address {
    city: String,
    state: String,
    country: String,
    pincode: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct User {
    name: String,
    age: String,
    contact: String,
    company: String,
    address: Address,
}

fn sample_employees() -> Vec<User> {
    let bangalore = Address {
        city: "bangalore".into(),
        state: "karnataka".into(),
        country: "india".into(),
        pincode: "111111".into(),
    };
    [
        ("John", "23", "golang dev community"),
        ("ray", "78", "golang dev community"),
        ("mingle", "16", "Google"),
        ("Paul", "23", "Facebook"),
        ("Pomodo", "23", "Remote-Teams"),
        ("Tanjiro", "88", "Dominate"),
    ]
    .into_iter()
    .map(|(name, age, company)| User {
        name: name.into(),
        age: age.into(),
        contact: "6464646464".into(),
        company: company.into(),
        address: bangalore.clone(),
    })
    .collect()
}

fn run() -> Result<(), jotdb_store::Error> {
    let db = Driver::new("./", Options::default())?;

    for employee in sample_employees() {
        db.write("users", &employee.name, &employee)?;
    }

    let records = db.read_all("users")?;
    println!("{:?}", records);

    let mut all_users = Vec::new();
    for blob in &records {
        let user: User = serde_json::from_str(blob)?;
        all_users.push(user);
    }
    println!("{:?}", all_users);

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
