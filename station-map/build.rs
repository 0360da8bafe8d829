use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    // Copy stations.csv to OUT_DIR for include_str
    let stations_src = Path::new("../fixtures/stations.csv");
    let stations_dest = Path::new(&out_dir).join("stations.csv");
    if stations_src.exists() {
        fs::copy(stations_src, &stations_dest).unwrap();
    } else {
        fs::write(
            &stations_dest,
            "network,station,name,latitude,longitude\nigs,qui3,Quito,-0.2170,-78.4938\n",
        )
        .unwrap();
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../fixtures/stations.csv");
}
