mod scan_bad;
