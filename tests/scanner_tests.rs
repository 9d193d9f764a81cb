// tests/scanner_tests.rs

use num::{BigInt, Num};
use phasesieve::config::scan_config::ScanConfig;
use phasesieve::scanner::cert::{extract_rsa_modulus, CertError};
use phasesieve::scanner::report::{scan_directory, write_report};
use phasesieve::search::cancellation::CancelToken;

// Self-signed 1024-bit RSA test certificate (throwaway key).
const RSA_CERT_PEM: &str = "-----BEGIN CERTIFICATE-----
MIICGDCCAYGgAwIBAgIUdXtM8u2YAIDUY5J1GrBJWlFnWXwwDQYJKoZIhvcNAQEL
BQAwHjEcMBoGA1UEAwwTUGhhc2VTaWV2ZSBUZXN0IFJTQTAeFw0yNjA4MjcyMzA3
MTFaFw0zNjA4MjQyMzA3MTFaMB4xHDAaBgNVBAMME1BoYXNlU2lldmUgVGVzdCBS
U0EwgZ8wDQYJKoZIhvcNAQEBBQADgY0AMIGJAoGBALxbNkmF1kSZh7ojQnIGYE0m
FEaKHRc8t0Si2U8c5rqV0AF1b26LjoCoJ53+CrpSyYFa6mJJ16eOLvgi7VHcX1k3
jE6OviGTIdYPbGpnlZbdbG5jaC54HQdw3tKFoPO7Rp05EMML6HrL8fi0DP4tNV2F
TI34Gd7YMb+f3QOwDqVDAgMBAAGjUzBRMB0GA1UdDgQWBBRvqoD9VYVTM2iH/Gw9
0RgMnxz4KDAfBgNVHSMEGDAWgBRvqoD9VYVTM2iH/Gw90RgMnxz4KDAPBgNVHRMB
Af8EBTADAQH/MA0GCSqGSIb3DQEBCwUAA4GBAE2pvC2dZHlKRNUMpNgAC1C+jPv+
alveA0VAOaw1nvIjjGg9VaLMdcVdrbpqYwdqC+b+uD1xG+m7OjZrkXXKQxn+xWQq
slD3/AfeUYPQL9cSZ7Avq0nz34V0bqWXpCY7xsCaiZdu3uB2ww2TIU/fJmJCtiSm
sFCDlMr4JCSdAPSM
-----END CERTIFICATE-----
";

const RSA_CERT_MODULUS_HEX: &str = "BC5B364985D6449987BA23427206604D2614468A1D173CB744A2D94F1CE6BA95D001756F6E8B8E80A8279DFE0ABA52C9815AEA6249D7A78E2EF822ED51DC5F59378C4E8EBE219321D60F6C6A679596DD6C6E63682E781D0770DED285A0F3BB469D3910C30BE87ACBF1F8B40CFE2D355D854C8DF819DED831BF9FDD03B00EA543";

// Self-signed P-256 EC certificate: valid X.509, wrong key type.
const EC_CERT_PEM: &str = "-----BEGIN CERTIFICATE-----
MIIBkDCCATWgAwIBAgIUUE0Jf6XxOrqLZhcz602+mQWoteswCgYIKoZIzj0EAwIw
HTEbMBkGA1UEAwwSUGhhc2VTaWV2ZSBUZXN0IEVDMB4XDTI2MDgyNzIzMDcxMVoX
DTM2MDgyNDIzMDcxMVowHTEbMBkGA1UEAwwSUGhhc2VTaWV2ZSBUZXN0IEVDMFkw
EwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAE9jXQQ2IIFiHELPOQ1zNa7knxJ5gImcmq
RjAmz8SyVjs6fGS9aVgcjzImWlgmBZJwW5jP19CQZzaTyP7s+jG/76NTMFEwHQYD
VR0OBBYEFER5dQLDzOAEs5dquHSKW/yzkajOMB8GA1UdIwQYMBaAFER5dQLDzOAE
s5dquHSKW/yzkajOMA8GA1UdEwEB/wQFMAMBAf8wCgYIKoZIzj0EAwIDSQAwRgIh
AP5QLGe3PDpYL/lu55BKum/GnT4ZpwN5VpnoThrbAoTSAiEA+1AJlmViaHfH1xdG
fWsLhPR/4qvHpfcnfSt8rezqabU=
-----END CERTIFICATE-----
";

#[cfg(test)]
mod scanner_tests {
    use super::*;

    #[test]
    fn test_extracts_rsa_modulus() {
        let n = extract_rsa_modulus(RSA_CERT_PEM.as_bytes()).unwrap();
        let expected = BigInt::from_str_radix(RSA_CERT_MODULUS_HEX, 16).unwrap();
        assert_eq!(n, expected);
        assert_eq!(n.bits(), 1024);
    }

    #[test]
    fn test_non_rsa_certificate_is_typed() {
        assert!(matches!(
            extract_rsa_modulus(EC_CERT_PEM.as_bytes()),
            Err(CertError::NotRsa)
        ));
    }

    #[test]
    fn test_garbage_is_not_pem() {
        assert!(matches!(
            extract_rsa_modulus(b"not a certificate at all"),
            Err(CertError::NotPem)
        ));
        assert!(matches!(extract_rsa_modulus(b""), Err(CertError::NotPem)));
    }

    #[test]
    fn test_scan_directory_reports_and_skips() {
        let dir = std::env::temp_dir().join(format!("phasesieve-scan-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("good.pem"), RSA_CERT_PEM).unwrap();
        std::fs::write(dir.join("ec.pem"), EC_CERT_PEM).unwrap();
        std::fs::write(dir.join("junk.txt"), "nothing to see").unwrap();

        // A 1024-bit modulus will not crack in five attempts; this exercises
        // the skip/scan accounting and the report writer, not the search.
        let cfg = ScanConfig {
            max_attempts: 5,
            threads: Some(1),
            ..ScanConfig::default()
        };
        let cancel = CancelToken::new();
        let report = scan_directory(&dir, &cfg, &cancel).unwrap();
        assert_eq!(report.scanned, 1, "only the RSA certificate is scannable");
        assert_eq!(report.skipped, 2, "EC cert and junk file are skipped");
        assert!(report.weak.is_empty());
        assert!(!report.cancelled);

        let path = write_report(&dir, &cfg, &report).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.is_empty(), "clean scan writes an empty report");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_cancelled_scan_stops_early() {
        let dir = std::env::temp_dir().join(format!("phasesieve-cancel-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("good.pem"), RSA_CERT_PEM).unwrap();

        let cfg = ScanConfig::default();
        let cancel = CancelToken::new();
        cancel.cancel();
        let report = scan_directory(&dir, &cfg, &cancel).unwrap();
        assert!(report.cancelled);
        assert_eq!(report.scanned, 0);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
