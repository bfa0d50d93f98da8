use std::{error::Error, path::Path};

use chrono::Local;
use fishing_forecast::{
    model::ForecastResponse,
    response_to_records,
    snapshot::{load_snapshot, save_snapshots},
    ForecastApiClient, ForecastApiCredentials, Gubun,
};
use spots::{
    backfill::{backfill_regions, refresh_coordinate_regions},
    database::Database,
    pipeline::IngestError,
    region::RegionResolver,
    report::IngestReport,
    Ingestor, RawRecord,
};

use crate::args::{Command, ForecastCommand};

pub async fn run<D: Database>(
    database: D,
    resolver: RegionResolver,
    command: &Command,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Spreadsheets { dir } => {
            let files = spreadsheet::find_spot_workbooks(dir)?;
            ingest_spreadsheets(&Ingestor::new(database, resolver), &files).await?;
        }
        Command::Spreadsheet { file } => {
            ingest_spreadsheets(&Ingestor::new(database, resolver), &[file.clone()]).await?;
        }
        Command::Forecast {
            command: ForecastCommand::Fetch {
                save_dir,
                skip_ingest,
            },
        } => {
            let credentials = ForecastApiCredentials::from_env()
                .ok_or("expected FORECAST_SERVICE_KEY in env.")?;
            let responses = fetch_forecast(&ForecastApiClient::new(&credentials)?).await;
            if let Some(dir) = save_dir {
                save_snapshots(dir, &responses, Local::now().naive_local())?;
            }
            if !skip_ingest {
                let snapshots = responses
                    .into_iter()
                    .map(|(gubun, response)| (Some(gubun), response));
                ingest_forecast(&Ingestor::new(database, resolver), snapshots).await?;
            }
        }
        Command::Forecast {
            command: ForecastCommand::Load { file },
        } => {
            let snapshots = load_snapshot(file)?
                .into_iter()
                .map(|snapshot| (snapshot.gubun, snapshot.response));
            ingest_forecast(&Ingestor::new(database, resolver), snapshots).await?;
        }
        Command::BackfillRegions => {
            backfill_regions(&database, &resolver).await?.print();
        }
        Command::RefreshCoordinateRegions => {
            refresh_coordinate_regions(&database, &resolver).await?.print();
        }
    }
    Ok(())
}

/// Ingests one source and adds its counts to `total`. The partial report of
/// an aborted source is added as well.
async fn ingest_source<D: Database>(
    ingestor: &Ingestor<D>,
    source: &str,
    records: Vec<RawRecord>,
    total: &mut IngestReport,
) -> Result<(), IngestError> {
    match ingestor.ingest(source, records).await {
        Ok(report) => {
            report.print();
            total.absorb(&report);
            Ok(())
        }
        Err(IngestError::Aborted { report, source }) => {
            report.print();
            total.absorb(&report);
            total.print();
            Err(IngestError::Aborted { report, source })
        }
    }
}

/// Files that can not be read are logged and left out.
pub async fn ingest_spreadsheets<D: Database, P: AsRef<Path>>(
    ingestor: &Ingestor<D>,
    files: &[P],
) -> Result<IngestReport, IngestError> {
    let mut total = IngestReport::new("spreadsheets");
    for (index, file) in files.iter().enumerate() {
        let file = file.as_ref();
        log::info!("file {}/{}: {}", index + 1, files.len(), file.display());
        let records = match spreadsheet::read_spot_file(file) {
            Ok(records) => records,
            Err(why) => {
                log::error!("could not read {}: {why}", file.display());
                continue;
            }
        };
        ingest_source(ingestor, &file.display().to_string(), records, &mut total).await?;
    }
    total.print();
    Ok(total)
}

/// A category that fails to download is logged and left out.
async fn fetch_forecast(client: &ForecastApiClient) -> Vec<(Gubun, ForecastResponse)> {
    let mut responses = Vec::new();
    for gubun in Gubun::ALL {
        match client.fetch_all(gubun).await {
            Ok(response) => responses.push((gubun, response)),
            Err(why) => log::error!("could not fetch {gubun}: {why}"),
        }
    }
    responses
}

pub async fn ingest_forecast<D, I>(
    ingestor: &Ingestor<D>,
    snapshots: I,
) -> Result<IngestReport, IngestError>
where
    D: Database,
    I: IntoIterator<Item = (Option<Gubun>, ForecastResponse)>,
{
    let today = Local::now().date_naive();
    let mut total = IngestReport::new("forecast");
    for (gubun, response) in snapshots {
        let label = gubun.map(|gubun| gubun.label());
        let records = response_to_records(&response, label, today);
        let source = format!("forecast {}", label.unwrap_or("(unknown category)"));
        ingest_source(ingestor, &source, records, &mut total).await?;
    }
    total.print();
    Ok(total)
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use model::region::Region;
    use spots::{database::SpotRepo, memory::InMemoryDatabase, region::OutOfBoundsPolicy};

    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn spreadsheet_directory() {
        let dir = temp_dir("ingest-spreadsheets");
        fs::write(
            dir.join("경기_낚시터.csv"),
            "낚시터명,낚시터유형,소재지도로명주소,전화번호\n\
             테스트낚시터,바다,경기도 김포시 대곶면 대명항1로 1,031-000-0000\n\
             주소없는낚시터,저수지,,\n\
             ,바다,,\n",
        )
        .unwrap();
        fs::write(dir.join("broken_낚시터.xlsx"), b"not a workbook").unwrap();

        let database = InMemoryDatabase::new();
        let ingestor = Ingestor::new(database.clone(), RegionResolver::default());
        let files = spreadsheet::find_spot_workbooks(&dir).unwrap();
        let report = ingest_spreadsheets(&ingestor, &files).await.unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped, 1);

        let spots = database.auto().spots().await.unwrap();
        assert_eq!(spots[0].content.region, Some(Region::Gyeonggi));
        // no address, the file name decides
        assert_eq!(spots[1].content.name, "주소없는낚시터");
        assert_eq!(spots[1].content.region, Some(Region::Gyeonggi));
    }

    #[tokio::test]
    async fn forecast_snapshot() {
        let dir = temp_dir("ingest-forecast");
        let file = dir.join("fishing_spots_all_20240805_093005.json");
        fs::write(
            &file,
            r#"{
                "갯바위": {"response": {"body": {"items": {"item": [
                    {"seafsPstnNm": "감천항 방파제", "lat": "35.08", "lot": "129.01"},
                    {"seafsPstnNm": "원양 포인트", "lat": "30.0", "lot": "140.0"}
                ]}}}},
                "선상": {"response": {"body": {"items": {"item":
                    {"seafsPstnNm": "좌표없음"}
                }}}}
            }"#,
        )
        .unwrap();

        let database = InMemoryDatabase::new();
        let ingestor = Ingestor::new(
            database.clone(),
            RegionResolver::new(OutOfBoundsPolicy::CatchAll),
        );
        let snapshots = load_snapshot(&file)
            .unwrap()
            .into_iter()
            .map(|snapshot| (snapshot.gubun, snapshot.response));
        let report = ingest_forecast(&ingestor, snapshots).await.unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped, 1);

        let spots = database.auto().spots().await.unwrap();
        let regions = spots
            .iter()
            .map(|spot| (spot.content.name.as_str(), spot.content.region))
            .collect::<Vec<_>>();
        assert!(regions.contains(&("감천항 방파제", Some(Region::Busan))));
        assert!(regions.contains(&("원양 포인트", Some(Region::Other))));
        assert!(spots
            .iter()
            .all(|spot| spot.content.gubun.as_deref() == Some("갯바위")));
    }

    #[tokio::test]
    async fn aborted_source_is_reported() {
        let database = InMemoryDatabase::new();
        database.set_available(false);
        let ingestor = Ingestor::new(database.clone(), RegionResolver::default());
        let records = vec![RawRecord::new().with(spots::SpotField::Name, "a")];

        let mut total = IngestReport::new("test");
        let result = ingest_source(&ingestor, "test", records, &mut total).await;
        assert!(matches!(result, Err(IngestError::Aborted { .. })));
        assert_eq!(total.inserted, 0);
    }
}
